use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use herald_gateway::api::{ApiServer, ApiState};
use herald_gateway::{Config, TelegramChannel, db};

/// Herald - Telegram webhook gateway for AI chat
#[derive(Parser)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "HERALD_PORT", default_value = "18790")]
    port: u16,

    /// Path to the conversation history database
    #[arg(long, env = "HERALD_DB", default_value = "herald.db")]
    db: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Register the webhook URL with Telegram
    SetWebhook {
        /// Public URL of this gateway's webhook endpoint
        url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,herald_gateway=info",
        1 => "info,herald_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Required settings are validated before any event is handled
    let config = Config::from_env()?;

    if let Some(Command::SetWebhook { url }) = cli.command {
        let channel = TelegramChannel::new(config.telegram_token.clone());
        channel
            .set_webhook(&url, config.webhook_secret.as_deref())
            .await?;
        return Ok(());
    }

    let pool = db::init(&cli.db)?;
    let state = Arc::new(ApiState::new(pool, &config));

    ApiServer::new(state, cli.port).run().await?;

    Ok(())
}
