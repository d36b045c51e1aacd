//! API Gateway - token issuance over HTTP plus store maintenance commands.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use auth_service_lib::fingerprint_secret;
use common::init_tracing;
use document_service_lib::{check_store, run_migrations, MigrateAction, DEFAULT_PROBE_TIMEOUT};
use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Document store gateway and token issuer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Overrides GATEWAY_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides GATEWAY_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Manage the document store schema
    Migrate {
        #[arg(value_enum)]
        action: MigrateCommand,
    },
    /// Probe document store availability
    Health {
        /// Seconds to wait before reporting the store unavailable
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print the fingerprint of a secret under the configured signing key
    Fingerprint {
        #[arg(long, env = "FINGERPRINT_SECRET")]
        secret: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MigrateCommand {
    Up,
    Down,
    Status,
    Fresh,
}

impl From<MigrateCommand> for MigrateAction {
    fn from(command: MigrateCommand) -> Self {
        match command {
            MigrateCommand::Up => MigrateAction::Up,
            MigrateCommand::Down => MigrateAction::Down,
            MigrateCommand::Status => MigrateAction::Status,
            MigrateCommand::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    init_tracing(config.log_level());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            gateway_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let applied = run_migrations(&config.store, action.into()).await?;
            for (name, done) in applied {
                println!("{} {}", if done { "[x]" } else { "[ ]" }, name);
            }
        }
        Commands::Health { timeout } => {
            let timeout = timeout.map(Duration::from_secs).unwrap_or(DEFAULT_PROBE_TIMEOUT);
            let report = check_store(&config.store, timeout).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.available {
                std::process::exit(1);
            }
        }
        Commands::Fingerprint { secret } => {
            config.token.validate()?;
            println!("{}", fingerprint_secret(&secret, config.token.signing_key_bytes())?);
        }
    }

    Ok(())
}
