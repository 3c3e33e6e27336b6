use async_trait::async_trait;
use tracing::debug;

use crate::error::AiError;
use crate::traits::PromptBuilder;

use super::types::{ChatRequest, WireMessage};
use super::OpenAi;

pub struct OpenAiPromptBuilder {
    agent: OpenAi,
    input: String,
    preamble: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiPromptBuilder {
    pub(crate) fn new(agent: OpenAi, input: String) -> Self {
        Self {
            agent,
            input,
            preamble: None,
            temperature: None,
            max_tokens: None,
        }
    }

    fn into_request(self) -> (OpenAi, ChatRequest) {
        let mut request = ChatRequest::new(self.agent.model());
        if let Some(preamble) = self.preamble {
            request = request.message(WireMessage::system(preamble));
        }
        request = request.message(WireMessage::user(self.input));

        if let Some(temp) = self.temperature {
            request = request.temperature(temp);
        }
        // Applied last: reasoning models drop the temperature again.
        if let Some(limit) = self.max_tokens {
            request = request.token_limit(limit);
        }

        (self.agent, request)
    }
}

#[async_trait]
impl PromptBuilder for OpenAiPromptBuilder {
    fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    async fn send(self) -> Result<String, AiError> {
        let (agent, request) = self.into_request();
        let client = agent.client()?;

        debug!(model = %request.model, "OpenAI prompt");

        client
            .chat(&request)
            .await?
            .into_content()
            .ok_or_else(|| AiError::EmptyResponse("OpenAI".to_string()))
    }
}
