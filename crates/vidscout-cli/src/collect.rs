//! The `collect` command: input → batched collection → aggregation → output.
//!
//! Input problems and remote failures abort the run with an error. A failure
//! to write the output file is reported on stderr and the run still ends
//! successfully.

use vidscout_apify::{collect_in_batches, plan_batches, ApifyClient, CollectionInput};
use vidscout_core::{prepare_identities, AppConfig, Identity};
use vidscout_pipeline::{build_output, write_table_file};

use crate::input::read_identity_column;

/// Runs one full collection.
///
/// When `dry_run` is `true` the working set and batch plan are printed and
/// the function returns without contacting the service or writing output.
///
/// # Errors
///
/// Returns an error if no input path is configured, the input cannot be
/// read, the API token is missing (outside a dry run), the client cannot be
/// built, or any remote run fails.
pub(crate) async fn run_collect(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let Some(input_path) = config.input_path.as_deref() else {
        anyhow::bail!("no input file given; pass --input or set VIDSCOUT_INPUT_PATH");
    };

    let raw = read_identity_column(input_path, &config.username_column)?;
    let identities = prepare_identities(raw, config.identity_limit);
    tracing::info!(
        identities = identities.len(),
        limit = ?config.identity_limit,
        "prepared working set"
    );

    if dry_run {
        print_plan(config, &identities);
        return Ok(());
    }

    let token = config.api_token()?;
    let client = ApifyClient::with_base_url(
        token,
        config.request_timeout_secs,
        &config.apify_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Apify client: {e}"))?
    .with_wait_for_finish_secs(config.wait_for_finish_secs);

    let items = collect_in_batches(&client, config, &identities).await?;
    let table = build_output(&identities, items, config.target_video_count);

    if let Err(e) = write_table_file(&table, &config.output_path) {
        tracing::error!(path = %config.output_path.display(), error = %e, "output write failed");
        eprintln!("error: could not write output: {e}");
        return Ok(());
    }

    println!(
        "wrote {} rows to {}",
        table.rows.len(),
        config.output_path.display()
    );
    Ok(())
}

fn print_plan(config: &AppConfig, identities: &[Identity]) {
    let plans = plan_batches(identities, config.batch_size);
    println!(
        "dry-run: would collect {} creators in {} batches of up to {}",
        identities.len(),
        plans.len(),
        config.batch_size
    );
    for plan in &plans {
        let input = CollectionInput::for_batch(
            plan.identities.iter().map(|i| i.name.clone()).collect(),
            config.target_video_count,
            config.capacity_slack,
        );
        let first = plan.identities.first().map_or("", |i| i.name.as_str());
        println!(
            "  batch {}: {} creators starting at '{first}', maxItems {}",
            plan.number,
            plan.identities.len(),
            input.max_items
        );
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
