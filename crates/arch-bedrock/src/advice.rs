//! Advice strategy selection and fallback.
//!
//! Whether generative advice is available is decided once, when the provider
//! is built. A generative provider makes a single bounded attempt per
//! assessment and drops to the rule-based text on any failure.

use std::sync::Arc;
use std::time::Duration;

use arch_core::models::assessment::AdviceSource;
use tracing::{info, warn};

use crate::client;
use crate::error::BedrockError;
use crate::generate::{BedrockTextGenerator, TextGenerator};
use crate::prompt::{self, AdviceRequest};
use crate::rules;

pub const DEFAULT_ADVICE_TIMEOUT: Duration = Duration::from_secs(20);

/// Startup configuration for advice generation.
#[derive(Debug, Clone)]
pub struct AdviceConfig {
    /// Bedrock model or inference profile ID. `None` disables generation.
    pub model_id: Option<String>,
    pub region: String,
    pub timeout: Duration,
}

/// Advisory text and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    pub text: String,
    pub source: AdviceSource,
}

impl Advice {
    fn rule_based(request: &AdviceRequest<'_>) -> Self {
        Self {
            text: rules::rule_based_advice(request.glucose).to_string(),
            source: AdviceSource::RuleBased,
        }
    }
}

/// Model-generated advice with a bounded wait.
#[derive(Clone)]
pub struct GenerativeAdvice {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl GenerativeAdvice {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    async fn generate(&self, request: &AdviceRequest<'_>) -> Result<String, BedrockError> {
        let prompt = prompt::build_prompt(request);
        let text = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| BedrockError::Timeout(self.timeout))??;
        if text.trim().is_empty() {
            return Err(BedrockError::EmptyResponse);
        }
        Ok(text)
    }
}

#[derive(Clone)]
pub enum AdviceProvider {
    Generative(GenerativeAdvice),
    RuleBased,
}

impl AdviceProvider {
    /// Pick the strategy from configuration. Generation is enabled only when
    /// a model is configured.
    pub async fn from_config(config: &AdviceConfig) -> Self {
        match config.model_id.as_deref().map(str::trim) {
            Some(model_id) if !model_id.is_empty() => {
                let client = client::build_client_with_region(&config.region).await;
                let generator = BedrockTextGenerator::new(client, model_id);
                info!(
                    model = generator.model_id(),
                    region = %config.region,
                    timeout_secs = config.timeout.as_secs(),
                    "generative advice enabled"
                );
                Self::Generative(GenerativeAdvice::new(Arc::new(generator), config.timeout))
            }
            _ => {
                info!("no advice model configured, using rule-based advice");
                Self::RuleBased
            }
        }
    }

    /// Produce advice for a scored reading. Never fails and never returns
    /// empty text.
    pub async fn advise(&self, request: &AdviceRequest<'_>) -> Advice {
        match self {
            Self::RuleBased => Advice::rule_based(request),
            Self::Generative(generative) => match generative.generate(request).await {
                Ok(text) => Advice {
                    text,
                    source: AdviceSource::Generative,
                },
                Err(e) => {
                    warn!(error = %e, "generative advice failed, falling back to rules");
                    Advice::rule_based(request)
                }
            },
        }
    }

    pub fn is_generative(&self) -> bool {
        matches!(self, Self::Generative(_))
    }
}
