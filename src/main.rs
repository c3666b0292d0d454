use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{ApplyCommand, CallCommand, ConfigCommand, LoginCommand};
use sloto_client::config::Config;

#[derive(Parser)]
#[command(name = "sloto")]
#[command(version)]
#[command(about = "Call instructor endpoints and mirror their state locally", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Call an endpoint and show the resulting server state
    Call(CallCommand),

    /// Log in and print the session token
    Login(LoginCommand),

    /// Fold an instruction file without calling the server
    Apply(ApplyCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sloto_client=info,sloto=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Call(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Login(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Apply(cmd)) => {
            cmd.run()?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
