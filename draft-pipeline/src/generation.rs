use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, warn};

use common::{error::AppError, utils::config::AppConfig};

use crate::prompt::{render_prompt, RenderedPrompt};
use crate::validator::GenerationRequest;

/// One response from the generation API: the text plus the usage metadata
/// the API reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Seam to the external generation API. Production wraps async-openai; tests
/// substitute scripted implementations.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<Completion, AppError>;
}

pub struct OpenAiGenerationApi {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiGenerationApi {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl GenerationApi for OpenAiGenerationApi {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<Completion, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages([
                ChatCompletionRequestSystemMessage::from(prompt.system.as_str()).into(),
                ChatCompletionRequestUserMessage::from(prompt.user.as_str()).into(),
            ])
            .build()
            .map_err(classify_openai_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        let model = response.model.clone();
        let (input_tokens, output_tokens) = response
            .usage
            .as_ref()
            .map_or((0, 0), |usage| (usage.prompt_tokens, usage.completion_tokens));

        let content = response
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::InternalError("No content found in generation response".into())
            })?;

        Ok(Completion {
            content,
            model,
            input_tokens,
            output_tokens,
        })
    }
}

/// Map an async-openai error onto the retry taxonomy. Classification reads
/// the structured error type and transport status, never message text.
pub(crate) fn classify_openai_error(err: OpenAIError) -> AppError {
    match err {
        OpenAIError::ApiError(api) => match api.r#type.as_deref() {
            Some("rate_limit_error" | "insufficient_quota" | "requests" | "tokens") => {
                AppError::UpstreamRateLimited(api.message)
            }
            Some("server_error" | "overloaded_error") => AppError::UpstreamTransient(api.message),
            _ => AppError::UpstreamRejected(api.message),
        },
        OpenAIError::Reqwest(transport) => {
            match transport.status().map(|status| status.as_u16()) {
                Some(429) => AppError::UpstreamRateLimited(transport.to_string()),
                Some(code) if (500..=599).contains(&code) => {
                    AppError::UpstreamTransient(transport.to_string())
                }
                Some(_) => AppError::UpstreamRejected(transport.to_string()),
                // The request never reached the service
                None => AppError::UpstreamTransient(transport.to_string()),
            }
        }
        other => AppError::OpenAI(other),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.max_generation_attempts.max(1),
            backoff_base: Duration::from_millis(config.backoff_base_millis.max(1)),
        }
    }
}

/// Drives the generation API with bounded retries. Only errors classified
/// transient consume retry budget; everything else surfaces immediately.
pub struct GenerationClient {
    api: Arc<dyn GenerationApi>,
    retry: RetryPolicy,
}

/// A successful generation, including how many attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub content: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub attempts: u32,
}

impl GenerationClient {
    pub fn new(api: Arc<dyn GenerationApi>, retry: RetryPolicy) -> Self {
        Self { api, retry }
    }

    /// Backoff schedule between attempts: the configured base delay, doubling
    /// each retry. `ExponentialBackoff` squares its base per step, so the
    /// doubling comes from base 2 scaled by a constant factor.
    fn backoff_delays(&self) -> impl Iterator<Item = Duration> {
        let factor = (self.retry.backoff_base.as_millis() as u64 / 2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .take(self.retry.max_attempts.saturating_sub(1) as usize)
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, AppError> {
        let prompt = render_prompt(request);
        let mut delays = self.backoff_delays();
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            match self.api.complete(&prompt).await {
                Ok(completion) => {
                    debug!(attempts, model = %completion.model, "Generation succeeded");
                    return Ok(GenerationOutcome {
                        content: completion.content,
                        model: completion.model,
                        input_tokens: completion.input_tokens,
                        output_tokens: completion.output_tokens,
                        attempts,
                    });
                }
                Err(err) if err.is_transient() => match delays.next() {
                    Some(delay) => {
                        warn!(
                            attempt = attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "Transient generation failure, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        return Err(AppError::UpstreamUnavailable {
                            attempts,
                            message: err.to_string(),
                        });
                    }
                },
                Err(err) => return Err(err),
            }
        }
    }
}
