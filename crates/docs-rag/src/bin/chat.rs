//! Terminal chat client for the answer service
//!
//! Reads questions from stdin and prints answers; failures surface as
//! friendly messages instead of raw errors.

use clap::Parser;
use std::io::{self, BufRead, Write};

use docs_rag::chat::ChatClient;
use docs_rag::config::ChatConfig;

#[derive(Parser)]
#[command(
    name = "docs-rag-chat",
    about = "Ask the documentation assistant from the terminal"
)]
struct Args {
    /// Answer-service endpoint (overrides CHAT_API_URL)
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ChatConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    let client = ChatClient::new(&config);
    println!(
        "Documentation assistant at {} (empty line to quit)",
        client.endpoint()
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            break;
        }

        match client.ask(query).await {
            Ok(answer) => println!("{}", answer),
            Err(e) => println!("{}", ChatClient::user_message(&e)),
        }
    }

    Ok(())
}
