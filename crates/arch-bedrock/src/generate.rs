use std::future::Future;
use std::pin::Pin;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::info;

use crate::error::BedrockError;
use crate::prompt::Prompt;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Upper bound on generated advice length, in model tokens.
pub const ADVICE_MAX_TOKENS: i32 = 300;

/// Anything that turns a prompt into text.
///
/// Methods return boxed futures for dyn compatibility.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a Prompt) -> BoxFuture<'a, Result<String, BedrockError>>;
}

/// Text generation through the Bedrock Converse API.
pub struct BedrockTextGenerator {
    client: Client,
    model_id: String,
    max_tokens: i32,
}

impl BedrockTextGenerator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens: ADVICE_MAX_TOKENS,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn converse(&self, prompt: &Prompt) -> Result<String, BedrockError> {
        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(prompt.system.clone()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(prompt.user.clone()))
                    .build()
                    .map_err(|e| BedrockError::Invocation(e.to_string()))?,
            )
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(BedrockError::EmptyResponse);
        }

        if let Some(usage) = response.usage() {
            info!(
                model = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "advice generated"
            );
        }

        Ok(text)
    }
}

impl TextGenerator for BedrockTextGenerator {
    fn generate<'a>(&'a self, prompt: &'a Prompt) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(self.converse(prompt))
    }
}
