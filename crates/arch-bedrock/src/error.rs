use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model did not respond within {0:?}")]
    Timeout(Duration),
}
