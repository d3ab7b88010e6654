use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fraud_guardian_client::commands::{self, AppContext};
use fraud_guardian_client::config::AppConfig;
use fraud_guardian_client::utils::cancel::CancelToken;

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["fraud_guardian_client=debug", "reqwest=warn", "hyper=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt() {
    print!("fraud-guardian> ");
    let _ = std::io::stdout().flush();
}

/// Run one command, cancelling it if Ctrl-C arrives first
async fn run_command(ctx: &AppContext, line: &str) -> Option<String> {
    let token = CancelToken::new();
    let _guard = token.drop_guard();

    tokio::select! {
        output = commands::handle_line(ctx, line, &token) => output,
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            Some("Cancelled".to_string())
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    info!("🛡️ Starting Fraud Guardian client...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };
    info!("Backend: {}", config.base_url);

    let ctx = match AppContext::from_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to create backend client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // One-shot mode: `fraud-guardian summary`
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        if let Some(output) = run_command(&ctx, &args.join(" ")).await {
            println!("{}", output);
        }
        return;
    }

    ctx.theme.load_persisted().await;
    println!("{}", commands::help::execute());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        if let Some(output) = run_command(&ctx, &line).await {
            println!("{}", output);
        }
    }

    info!("Goodbye");
}
