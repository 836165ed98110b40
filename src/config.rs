use std::env;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub ollama_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub system_message: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let ollama_url = env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());

        // Default to a 4-bit quantized build so the pipeline fits on
        // CPU-only machines. Override with RAGSEAL_CHAT_MODEL.
        let chat_model = env::var("RAGSEAL_CHAT_MODEL")
            .unwrap_or_else(|_| "llama3.2:3b-instruct-q4_K_M".to_string());

        let embed_model = env::var("RAGSEAL_EMBED_MODEL")
            .unwrap_or_else(|_| "nomic-embed-text".to_string());

        let system_message = env::var("RAGSEAL_SYSTEM_MESSAGE").unwrap_or_else(|_| {
            "You are a precise assistant that answers questions strictly from the \
             provided document context."
                .to_string()
        });

        let chunk_size = env::var("RAGSEAL_CHUNK_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200);

        let chunk_overlap = env::var("RAGSEAL_CHUNK_OVERLAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(40);

        let top_k = env::var("RAGSEAL_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Self {
            ollama_url,
            chat_model,
            embed_model,
            system_message,
            chunk_size,
            chunk_overlap,
            top_k,
        }
    }
}
