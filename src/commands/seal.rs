use colored::Colorize;

use crate::pipeline::Pipeline;

pub fn handle_key_command(pipeline: &Pipeline) -> Result<(), String> {
    println!("\n🔑 Session key (base64):");
    println!("{}", pipeline.key().to_base64().yellow());
    println!("Retain this key: tokens sealed in this session cannot be decrypted without it.");
    println!();
    Ok(())
}

pub fn handle_seal_command(text: &str, pipeline: &Pipeline) -> Result<(), String> {
    if text.is_empty() {
        println!("Please provide text to seal.");
        println!("Usage: seal <text>");
        return Ok(());
    }

    let token = pipeline
        .seal(text)
        .map_err(|e| format!("Failed to seal text: {}", e))?;

    println!("🔐 {}", token.bright_cyan());
    Ok(())
}

pub fn handle_unseal_command(token: &str, pipeline: &Pipeline) -> Result<(), String> {
    if token.is_empty() {
        println!("Please provide a token to unseal.");
        println!("Usage: unseal <token>");
        return Ok(());
    }

    let text = pipeline
        .unseal(token)
        .map_err(|e| format!("Failed to unseal token: {}", e))?;

    println!("💬 {}", text.truecolor(255, 236, 179));
    Ok(())
}
