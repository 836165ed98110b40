use colored::Colorize;

use crate::pipeline::Pipeline;

pub async fn handle_command(question: &str, pipeline: &Pipeline) -> Result<(), String> {
    if question.is_empty() {
        println!("Please provide a question.");
        println!("Usage: ask <question>");
        return Ok(());
    }

    println!("🔎 Retrieving context for: {}", question.bright_yellow());

    let token = pipeline
        .ask_sealed(question)
        .await
        .map_err(|e| format!("Failed to answer question: {}", e))?;

    println!("\n🔐 Sealed answer token:");
    println!("{}", token.bright_cyan());

    // Round-trip with the session key to show the token is recoverable
    let answer = pipeline
        .unseal(&token)
        .map_err(|e| format!("Failed to unseal answer: {}", e))?;

    println!("\n💬 Unsealed with session key:");
    println!("{}", answer.truecolor(255, 236, 179));
    println!();
    Ok(())
}
