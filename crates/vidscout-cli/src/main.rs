mod collect;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vidscout")]
#[command(about = "Batched creator collection and enrichment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect recent items for every creator in an input CSV and write the
    /// enriched table
    Collect {
        /// Input CSV with one creator per row (overrides `VIDSCOUT_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output path; `.csv` writes CSV, anything else an `.xlsx` workbook
        /// (overrides `VIDSCOUT_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Header of the creator column (overrides `VIDSCOUT_USERNAME_COLUMN`)
        #[arg(long)]
        column: Option<String>,

        /// Only process the first N distinct creators
        #[arg(long)]
        limit: Option<usize>,

        /// Print the working set and batch plan without contacting the service
        #[arg(long)]
        dry_run: bool,
    },
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default)]
struct Overrides {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    column: Option<String>,
    limit: Option<usize>,
}

fn apply_overrides(config: &mut vidscout_core::AppConfig, overrides: Overrides) {
    if let Some(path) = overrides.input {
        config.input_path = Some(path);
    }
    if let Some(path) = overrides.output {
        config.output_path = path;
    }
    if let Some(column) = overrides.column {
        config.username_column = column;
    }
    if overrides.limit.is_some() {
        config.identity_limit = overrides.limit;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("vidscout: no command given; run `vidscout collect --help`");
        return Ok(());
    };

    let mut config = vidscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Collect {
            input,
            output,
            column,
            limit,
            dry_run,
        } => {
            apply_overrides(
                &mut config,
                Overrides {
                    input,
                    output,
                    column,
                    limit,
                },
            );
            tracing::debug!(?config, "resolved configuration");
            collect::run_collect(&config, dry_run).await?;
        }
    }

    Ok(())
}
