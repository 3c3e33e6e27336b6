mod client;
pub mod prompt_builder;
pub(crate) mod types;

pub use prompt_builder::OpenAiPromptBuilder;

use std::time::Duration;

use crate::error::AiError;
use crate::traits::Agent;

use client::OpenAiClient;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    model: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAi")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Points the client at an OpenAI-compatible proxy.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Upper bound for a whole request, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> Result<OpenAiClient, AiError> {
        let client = OpenAiClient::new(&self.api_key, self.timeout)?;
        Ok(match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        })
    }
}

impl Agent for OpenAi {
    type PromptBuilder = OpenAiPromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> OpenAiPromptBuilder {
        OpenAiPromptBuilder::new(self.clone(), input.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let ai = OpenAi::new("sk-test", "gpt-3.5-turbo");
        assert_eq!(ai.model(), "gpt-3.5-turbo");
        assert_eq!(ai.timeout, DEFAULT_TIMEOUT);
        assert!(ai.base_url.is_none());

        let ai = ai
            .with_base_url("https://proxy.example")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(ai.base_url.as_deref(), Some("https://proxy.example"));
        assert_eq!(ai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let ai = OpenAi::new("sk-secret", "gpt-3.5-turbo");
        let rendered = format!("{ai:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("gpt-3.5-turbo"));
    }
}
