use crate::pipeline::Pipeline;

mod ask;
mod docs;
mod seal;
mod system;

pub struct CommandHandler {
    pipeline: Pipeline,
}

impl CommandHandler {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub async fn handle_command(&self, input: &str) -> Result<(), String> {
        if input.is_empty() {
            return Ok(());
        }

        let input = input.trim();

        // Handle single-word commands first
        match input.to_lowercase().as_str() {
            "help" | "exit" | "quit" => return system::handle_command(input),
            "docs" => return docs::handle_command(&self.pipeline).await,
            "key" => return seal::handle_key_command(&self.pipeline),
            "model" => return docs::handle_model_command(&self.pipeline).await,
            _ => {}
        }

        // Handle command prefixes
        if let Some(question) = input.strip_prefix("ask ") {
            return ask::handle_command(question.trim(), &self.pipeline).await;
        }

        if let Some(text) = input.strip_prefix("seal ") {
            return seal::handle_seal_command(text.trim(), &self.pipeline);
        }

        if let Some(token) = input.strip_prefix("unseal ") {
            return seal::handle_unseal_command(token.trim(), &self.pipeline);
        }

        // Default to asking if no command matches
        ask::handle_command(input, &self.pipeline).await
    }
}
