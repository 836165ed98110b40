use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ollama_rs::generation::chat::{request::ChatMessageRequest, ChatMessage};
use ollama_rs::generation::embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest};
use ollama_rs::Ollama;

use crate::config::PipelineConfig;
use crate::providers::traits::CompletionProvider;

/// Generation and embedding backend over a local Ollama instance.
///
/// The configured chat model tag names a quantized build (q4_K_M by default),
/// pulled once by name from the model registry and cached locally by Ollama.
pub struct OllamaProvider {
    client: Ollama,
    chat_model: String,
    embed_model: String,
    system_message: String,
}

impl OllamaProvider {
    pub async fn connect(config: &PipelineConfig) -> Result<Self> {
        let (host, port) = parse_base_url(&config.ollama_url);
        let client = Ollama::new(host, port);

        let provider = Self {
            client,
            chat_model: config.chat_model.clone(),
            embed_model: config.embed_model.clone(),
            system_message: config.system_message.clone(),
        };
        provider.ensure_models().await?;
        Ok(provider)
    }

    /// Pulls both model tags by name. Ollama caches weights locally, so the
    /// pull is a no-op after the first run. A failed pull is fatal.
    async fn ensure_models(&self) -> Result<()> {
        for model in [&self.chat_model, &self.embed_model] {
            log::info!("Ensuring model is available: {}", model);
            self.client
                .pull_model(model.clone(), false)
                .await
                .map_err(|e| anyhow!("Failed to pull model {}: {}", model, e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(self.system_message.clone()),
            ChatMessage::user(prompt.to_string()),
        ];

        let request = ChatMessageRequest::new(self.chat_model.clone(), messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| anyhow!("Ollama chat error: {}", e))?;

        Ok(response.message.content)
    }

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let request = GenerateEmbeddingsRequest::new(
            self.embed_model.clone(),
            EmbeddingsInput::Single(text.to_string()),
        );

        let response = self
            .client
            .generate_embeddings(request)
            .await
            .map_err(|e| anyhow!("Ollama embedding error: {}", e))?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Ollama returned no embedding for input"))
    }

    async fn get_model_info(&self) -> Result<String> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| anyhow!("Failed to list local models: {}", e))?;

        let local = models
            .iter()
            .find(|m| m.name == self.chat_model)
            .map(|m| format!("{} ({} bytes on disk)", m.name, m.size))
            .unwrap_or_else(|| format!("{} (not yet pulled)", self.chat_model));

        Ok(format!(
            "chat: {} | embeddings: {}",
            local, self.embed_model
        ))
    }
}

fn parse_base_url(base_url: &str) -> (String, u16) {
    let without_scheme = base_url
        .split("://")
        .nth(1)
        .unwrap_or(base_url);

    let mut host_port = without_scheme.trim_end_matches('/').split(':');
    let host = host_port
        .next()
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost")
        .to_string();
    let port = host_port
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(11434);

    (host, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parsing_full() {
        assert_eq!(
            parse_base_url("http://localhost:11434"),
            ("localhost".to_string(), 11434)
        );
    }

    #[test]
    fn test_url_parsing_no_port() {
        assert_eq!(
            parse_base_url("http://localhost"),
            ("localhost".to_string(), 11434)
        );
    }

    #[test]
    fn test_url_parsing_custom_host_and_port() {
        assert_eq!(
            parse_base_url("http://192.168.1.100:8080"),
            ("192.168.1.100".to_string(), 8080)
        );
    }

    #[test]
    fn test_url_parsing_no_scheme() {
        assert_eq!(
            parse_base_url("ollama.internal:9000"),
            ("ollama.internal".to_string(), 9000)
        );
    }
}
