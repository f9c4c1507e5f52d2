use arch_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessError {
    /// Trend cannot be assumed absent, so a failed history fetch fails the
    /// whole assessment.
    #[error("reading history fetch failed: {0}")]
    History(#[source] StoreError),

    #[error("recording assessment failed: {0}")]
    Record(#[source] StoreError),
}
