use ragseal::commands::CommandHandler;
use ragseal::config::PipelineConfig;
use ragseal::crypto::SealKey;
use ragseal::pipeline::Pipeline;

use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Document question answering with sealed answers", long_about = None)]
struct Args {
    /// Directory containing .txt / .pdf documents to index
    #[arg(short, long)]
    docs: PathBuf,

    /// Chat model tag; quantized builds recommended (e.g. *-q4_K_M)
    #[arg(long)]
    model: Option<String>,

    /// Embedding model tag
    #[arg(long)]
    embed_model: Option<String>,

    /// Base64 session key; generated when omitted
    #[arg(long)]
    key: Option<String>,

    /// One-shot question; prints the sealed token and exits
    #[arg(long)]
    ask: Option<String>,

    /// Number of chunks retrieved per question; overrides RAGSEAL_TOP_K
    #[arg(long)]
    top_k: Option<usize>,
}

/// Flags take precedence over env-derived config, but only when actually
/// passed on the command line.
fn apply_cli_overrides(config: &mut PipelineConfig, args: &Args) {
    if let Some(model) = &args.model {
        config.chat_model = model.clone();
    }
    if let Some(model) = &args.embed_model {
        config.embed_model = model.clone();
    }
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize colored output
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let mut config = PipelineConfig::from_env();
    apply_cli_overrides(&mut config, &args);

    // Session key: caller-supplied, or generated once for this run
    let key = match &args.key {
        Some(encoded) => SealKey::from_base64(encoded)?,
        None => {
            let key = SealKey::generate();
            println!(
                "🔑 Generated session key (retain it to decrypt later): {}",
                key.to_base64().yellow()
            );
            key
        }
    };

    let pipeline = Pipeline::build(&config, &args.docs, key).await?;
    println!(
        "📚 Indexed {} chunks from {}",
        pipeline.index().len(),
        args.docs.display()
    );

    if let Some(question) = &args.ask {
        let token = pipeline.ask_sealed(question).await?;
        println!("{}", token);
        return Ok(());
    }

    run_repl(pipeline).await
}

async fn run_repl(pipeline: Pipeline) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let command_handler = CommandHandler::new(pipeline);

    // Show initial help menu
    command_handler.handle_command("help").await.ok();

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("👤 ") {
            Ok(line) => {
                let input = line.trim();
                rl.add_history_entry(input)?;

                if let Err(e) = command_handler.handle_command(input).await {
                    println!("{}", e.red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
