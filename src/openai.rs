//! OpenAI chat client configured from settings.

use crate::config::LlmSettings;
use crate::error::{NotesError, Result};
use crate::generator::{ChatModel, ChatRequest};
use crate::retry::retry_once;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Create an OpenAI client with an API key and request timeout.
pub fn create_client(api_key: &str, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| NotesError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config).with_http_client(http_client))
}

/// Chat completion model backed by the OpenAI API.
pub struct OpenAIChat {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIChat {
    /// Create a chat model from LLM settings. Fails if no API key is configured.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                NotesError::Config(
                    "OpenAI API key not configured. Set it with: export OPENAI_API_KEY='sk-...'"
                        .to_string(),
                )
            })?;

        Ok(Self {
            client: create_client(api_key, Duration::from_secs(settings.timeout_secs))?,
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &ChatRequest) -> Result<CreateChatCompletionRequest> {
        let to_err = |e: OpenAIError| NotesError::GenerationFailed(e.to_string());

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(to_err)?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(to_err)?
                .into(),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_output_tokens)
            .build()
            .map_err(to_err)
    }
}

fn is_transient(error: &OpenAIError) -> bool {
    matches!(error, OpenAIError::Reqwest(e) if e.is_connect() || e.is_timeout())
}

#[async_trait]
impl ChatModel for OpenAIChat {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let api_request = self.build_request(request)?;

        let client = &self.client;
        let api_request = &api_request;
        let response = retry_once(
            "OpenAI request",
            move || async move { client.chat().create(api_request.clone()).await },
            is_transient,
        )
        .await
        .map_err(|e| NotesError::GenerationFailed(format!("OpenAI API error: {}", e)))?;

        if let Some(usage) = &response.usage {
            debug!(
                "Token usage: {} prompt, {} completion",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}
