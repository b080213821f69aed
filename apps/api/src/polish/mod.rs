// Text polisher: rewrites report text for pet owners through the language
// model, plus a model-free tidy.

pub mod handlers;
pub mod options;
pub mod prompts;
pub mod tidy;

use async_trait::async_trait;
use tracing::info;

use crate::llm_client::{LlmClient, LlmError};
pub use options::PolishOptions;

/// Seam between the HTTP handler and whatever rewrites the text.
#[async_trait]
pub trait TextPolisher: Send + Sync {
    async fn polish(&self, text: &str, options: PolishOptions) -> Result<String, LlmError>;
}

/// Default polisher backed by the chat-completions client.
pub struct LlmPolisher {
    llm: LlmClient,
}

impl LlmPolisher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextPolisher for LlmPolisher {
    async fn polish(&self, text: &str, options: PolishOptions) -> Result<String, LlmError> {
        info!("Polishing {} chars ({options})", text.chars().count());
        let system = prompts::system_prompt(&options);
        let user = prompts::user_prompt(text);
        self.llm.complete(&system, &user).await
    }
}
