use std::env;
use std::time::Duration;

use arch_bedrock::advice::{AdviceConfig, DEFAULT_ADVICE_TIMEOUT};

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct AssessConfig {
    pub region: String,
    /// When set, history is read from and outcomes are written to this bucket.
    pub bucket: Option<String>,
    pub advice: AdviceConfig,
}

impl AssessConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let timeout = match get("ARCH_ADVICE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| {
                    eyre::eyre!("ARCH_ADVICE_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}: {e}")
                })?;
                if secs == 0 {
                    return Err(eyre::eyre!("ARCH_ADVICE_TIMEOUT_SECS must be at least 1"));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_ADVICE_TIMEOUT,
        };

        Ok(Self {
            bucket: get("ARCH_BUCKET"),
            advice: AdviceConfig {
                model_id: get("ARCH_ADVICE_MODEL_ID"),
                region: region.clone(),
                timeout,
            },
            region,
        })
    }
}
