pub mod batch;
pub mod client;
pub mod error;
pub mod types;

pub use batch::{collect_in_batches, plan_batches, BatchPlan};
pub use client::ApifyClient;
pub use error::ApifyError;
pub use types::{CollectionInput, RunData, RunStatus};
