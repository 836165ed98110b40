use colored::Colorize;

use crate::pipeline::Pipeline;

pub async fn handle_command(pipeline: &Pipeline) -> Result<(), String> {
    let index = pipeline.index();

    println!("\n📚 Index Status:");
    println!("  Chunks indexed: {}", index.len().to_string().cyan());
    println!(
        "  Embedding dimension: {}",
        index
            .dimension()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string())
            .cyan()
    );

    println!("  Sources:");
    for source in index.sources() {
        println!("    • {}", source.bright_yellow());
    }
    println!();
    Ok(())
}

pub async fn handle_model_command(pipeline: &Pipeline) -> Result<(), String> {
    let info = pipeline
        .model_info()
        .await
        .map_err(|e| format!("Failed to get model info: {}", e))?;

    println!("🤖 {}", info.cyan());
    Ok(())
}
