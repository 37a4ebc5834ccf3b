//! Sequential batch submission.
//!
//! The working set is split into consecutive chunks of at most
//! `batch_size` identities. Each chunk becomes one actor run that is
//! started, awaited, and drained before the next chunk is submitted.
//! A failed run aborts the whole collection; there is no retry.

use std::time::Instant;

use vidscout_core::{AppConfig, Identity};

use crate::client::ApifyClient;
use crate::error::ApifyError;
use crate::types::CollectionInput;

/// One planned chunk of the working set. `number` is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct BatchPlan<'a> {
    pub number: usize,
    pub identities: &'a [Identity],
}

/// Splits `identities` into consecutive chunks of at most `batch_size`.
/// The last chunk may be shorter; an empty input yields no chunks.
#[must_use]
pub fn plan_batches(identities: &[Identity], batch_size: usize) -> Vec<BatchPlan<'_>> {
    identities
        .chunks(batch_size.max(1))
        .enumerate()
        .map(|(idx, chunk)| BatchPlan {
            number: idx + 1,
            identities: chunk,
        })
        .collect()
}

/// Runs one actor job per batch, in order, and concatenates every dataset
/// item the jobs produced.
///
/// # Errors
///
/// Returns the first [`ApifyError`] raised while starting, awaiting, or
/// draining any run. Items from earlier batches are discarded.
pub async fn collect_in_batches(
    client: &ApifyClient,
    config: &AppConfig,
    identities: &[Identity],
) -> Result<Vec<serde_json::Value>, ApifyError> {
    let plans = plan_batches(identities, config.batch_size);
    let batch_count = plans.len();
    let mut all_items: Vec<serde_json::Value> = Vec::new();

    tracing::info!(
        identities = identities.len(),
        batches = batch_count,
        batch_size = config.batch_size,
        "starting collection"
    );

    for plan in plans {
        let started = Instant::now();
        let usernames: Vec<String> = plan.identities.iter().map(|i| i.name.clone()).collect();
        let first = usernames.first().cloned().unwrap_or_default();
        let input = CollectionInput::for_batch(
            usernames,
            config.target_video_count,
            config.capacity_slack,
        );

        tracing::info!(
            batch = plan.number,
            of = batch_count,
            size = plan.identities.len(),
            first = %first,
            max_items = input.max_items,
            "submitting batch"
        );

        let run = client.start_run(&config.actor_id, &input).await?;
        tracing::info!(batch = plan.number, run_id = %run.id, "run started, waiting for finish");

        let finished = client.wait_for_run(&run.id).await?;
        let items: Vec<serde_json::Value> =
            client.dataset_items(&finished.default_dataset_id).await?;

        tracing::info!(
            batch = plan.number,
            run_id = %finished.id,
            items = items.len(),
            elapsed_secs = started.elapsed().as_secs(),
            "batch complete"
        );
        all_items.extend(items);
    }

    tracing::info!(total_items = all_items.len(), "collection finished");
    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities(n: usize) -> Vec<Identity> {
        (0..n).map(|i| Identity::new(format!("user{i}"))).collect()
    }

    #[test]
    fn plan_splits_120_into_100_and_20() {
        let ids = identities(120);
        let plans = plan_batches(&ids, 100);
        let sizes: Vec<usize> = plans.iter().map(|p| p.identities.len()).collect();
        assert_eq!(sizes, vec![100, 20]);
        assert_eq!(plans[0].number, 1);
        assert_eq!(plans[1].number, 2);
        assert_eq!(plans[1].identities[0].name, "user100");
    }

    #[test]
    fn plan_exact_multiple_has_no_trailing_chunk() {
        let ids = identities(200);
        assert_eq!(plan_batches(&ids, 100).len(), 2);
    }

    #[test]
    fn plan_empty_input_has_no_chunks() {
        assert!(plan_batches(&[], 100).is_empty());
    }

    #[test]
    fn plan_treats_zero_batch_size_as_one() {
        let ids = identities(3);
        assert_eq!(plan_batches(&ids, 0).len(), 3);
    }
}
