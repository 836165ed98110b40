pub fn handle_command(input: &str) -> Result<(), String> {
    match input.to_lowercase().as_str() {
        "help" => {
            println!("\n❓ Question Commands:");
            println!("  ask <question>   - Answer from the indexed documents (sealed)");
            println!("  Plain text without a command is treated as a question");
            println!();

            println!("🔐 Sealing Commands:");
            println!("  seal <text>      - Encrypt text under the session key");
            println!("  unseal <token>   - Decrypt a token sealed in this session");
            println!("  key              - Show the session key (retain it!)");
            println!();

            println!("📚 Index Commands:");
            println!("  docs             - Show indexed documents and chunk count");
            println!("  model            - Show the active model tags");
            println!();

            println!("⚙️ System Commands:");
            println!("  help  - Show this help menu");
            println!("  exit  - Exit the program");
            println!();
            Ok(())
        }
        "exit" | "quit" => {
            println!("👋 Goodbye!");
            std::process::exit(0);
        }
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string()),
    }
}
