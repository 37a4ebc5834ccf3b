//! HTTP client for the Apify REST API (v2).
//!
//! Covers the three calls a collection job needs: start an actor run,
//! long-poll it until it reaches a terminal state, and page through the
//! run's default dataset.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::ApifyError;
use crate::types::{ApiResponse, CollectionInput, RunData, RunStatus};

const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// Dataset items requested per page.
pub(crate) const DATASET_PAGE_SIZE: usize = 1000;

/// Upper bound on dataset pages, guarding against a server that never
/// returns a short page.
pub(crate) const MAX_DATASET_PAGES: usize = 10_000;

/// Pause between status polls of a run that is still in progress.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Client for the Apify REST API.
///
/// Use [`ApifyClient::new`] for production or [`ApifyClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: Url,
    wait_for_finish_secs: u64,
    poll_interval: Duration,
}

impl ApifyClient {
    /// Creates a client pointed at the production Apify API.
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, ApifyError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApifyError::InvalidBaseUrl`] if
    /// `base_url` cannot carry path segments.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ApifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vidscout/0.1 (creator-enrichment)")
            .build()?;

        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ApifyError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApifyError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry path segments".to_owned(),
            });
        }

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url: parsed,
            wait_for_finish_secs: 60,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Sets the server-side long-poll window used by [`Self::wait_for_run`].
    #[must_use]
    pub fn with_wait_for_finish_secs(mut self, secs: u64) -> Self {
        self.wait_for_finish_secs = secs;
        self
    }

    /// Sets the pause between polls of a run that has not finished yet.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Starts an actor run and returns immediately with its metadata.
    ///
    /// # Errors
    ///
    /// - [`ApifyError::Api`] on a non-2xx response.
    /// - [`ApifyError::Http`] on network failure.
    /// - [`ApifyError::Deserialize`] if the run envelope does not parse.
    pub async fn start_run(
        &self,
        actor_id: &str,
        input: &CollectionInput,
    ) -> Result<RunData, ApifyError> {
        let url = self.endpoint(&["acts", actor_id, "runs"]);
        let request = self.client.post(url).json(input);
        let envelope: ApiResponse<RunData> = self
            .send_json(request, &format!("start run of actor {actor_id}"))
            .await?;
        Ok(envelope.data)
    }

    /// Blocks until the run reaches a terminal state.
    ///
    /// Each request asks Apify to hold the connection for up to the
    /// configured `waitForFinish` window. Between polls of an unfinished run
    /// the client sleeps for the poll interval; the loop itself has no
    /// deadline.
    ///
    /// # Errors
    ///
    /// - [`ApifyError::RunFailed`] if the run ends `FAILED`, `ABORTED` or
    ///   `TIMED-OUT`.
    /// - Any transport or decoding error from the poll request.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData, ApifyError> {
        let wait = self.wait_for_finish_secs.to_string();
        loop {
            let mut url = self.endpoint(&["actor-runs", run_id]);
            url.query_pairs_mut().append_pair("waitForFinish", &wait);

            let envelope: ApiResponse<RunData> = self
                .send_json(self.client.get(url), &format!("poll run {run_id}"))
                .await?;
            let run = envelope.data;

            if run.status == RunStatus::Succeeded {
                return Ok(run);
            }
            if run.status.is_terminal() {
                return Err(ApifyError::RunFailed {
                    status: run.status.to_string(),
                    run_id: run.id,
                });
            }
            tracing::debug!(run_id, status = %run.status, "run still in progress");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetches every item of a dataset, following offset pagination until a
    /// short page is returned.
    ///
    /// # Errors
    ///
    /// Propagates request errors and returns [`ApifyError::PaginationLimit`]
    /// if the dataset never ends.
    pub async fn dataset_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<T>, ApifyError> {
        let mut items: Vec<T> = Vec::new();
        let limit = DATASET_PAGE_SIZE.to_string();

        for page in 0..MAX_DATASET_PAGES {
            let offset = (page * DATASET_PAGE_SIZE).to_string();
            let mut url = self.endpoint(&["datasets", dataset_id, "items"]);
            url.query_pairs_mut()
                .append_pair("format", "json")
                .append_pair("clean", "true")
                .append_pair("offset", &offset)
                .append_pair("limit", &limit);

            let batch: Vec<T> = self
                .send_json(
                    self.client.get(url),
                    &format!("dataset {dataset_id} at offset {offset}"),
                )
                .await?;
            let received = batch.len();
            items.extend(batch);

            if received < DATASET_PAGE_SIZE {
                return Ok(items);
            }
        }

        Err(ApifyError::PaginationLimit {
            dataset_id: dataset_id.to_owned(),
            max_pages: MAX_DATASET_PAGES,
        })
    }

    /// Builds an endpoint URL by appending path segments to the API root.
    /// Segments are percent-encoded individually.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `with_base_url` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends an authenticated request, asserts a 2xx status, and decodes the
    /// JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApifyError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApifyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
