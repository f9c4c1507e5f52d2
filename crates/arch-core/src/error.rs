use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid glucose level: {0} (must be a finite value above 0 mg/dL)")]
    InvalidGlucose(f64),

    #[error("invalid stress level: {0}")]
    InvalidStressLevel(String),

    #[error("alert {0} is already resolved")]
    AlertAlreadyResolved(uuid::Uuid),
}
