use async_trait::async_trait;
use open_ai_rust_responses_by_sshift::{Client as OAIClient, Model, Request};

/// Anything that can turn a prompt into prose.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, anyhow::Error>;
}

#[derive(Clone)]
pub struct AI {
    openai_client: OAIClient,
    max_output_tokens: u32,
}

impl AI {
    pub fn new(openai_api_key: &str, max_output_tokens: u32) -> Result<Self, anyhow::Error> {
        let openai_client = OAIClient::new(openai_api_key)?;

        Ok(Self {
            openai_client,
            max_output_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for AI {
    async fn generate(&self, prompt: &str) -> Result<String, anyhow::Error> {
        log::info!("Requesting wallet analysis ({} prompt chars)", prompt.len());

        let request = Request::builder()
            .model(Model::GPT4o)
            .input(prompt.to_string())
            .max_output_tokens(self.max_output_tokens)
            .temperature(0.8)
            .build();

        let response = self.openai_client.responses.create(request).await?;
        let reply = response.output_text();

        log::debug!("Wallet analysis reply has {} chars", reply.len());

        Ok(reply)
    }
}
