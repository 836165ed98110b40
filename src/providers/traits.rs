use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>>;

    async fn get_model_info(&self) -> Result<String>;
}
