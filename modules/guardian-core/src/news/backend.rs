// Text-generation seam for the news generator.
//
// TextBackend hides the concrete provider so the generator can be driven by
// scripted backends in tests. OpenAiBackend is the production implementation.

use anyhow::Result;
use async_trait::async_trait;

use ai_client::{Agent, OpenAi, PromptBuilder};

#[async_trait]
pub trait TextBackend: Send + Sync {
    /// One system + user exchange. Returns the raw completion text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "backend"
    }
}

pub struct OpenAiBackend {
    ai: OpenAi,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiBackend {
    pub fn new(ai: OpenAi, temperature: f32, max_tokens: u32) -> Self {
        Self {
            ai,
            temperature,
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        self.ai.model()
    }
}

#[async_trait]
impl TextBackend for OpenAiBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let reply = self
            .ai
            .prompt(user)
            .preamble(system)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .send()
            .await?;
        Ok(reply)
    }

    fn name(&self) -> &str {
        self.ai.model()
    }
}
