//! connecteddrive - query and control a BMW ConnectedDrive vehicle.
//!
//! Account data and the session token are read from openHAB items; vehicle
//! values are published back to openHAB. The process exit code reports the
//! outcome so that openHAB rules can react to it.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use connecteddrive_core::{
    remote::CommandExecutor, telemetry, Config, Credential, CredentialManager, ExitStatus,
    ItemStore, OpenHabStore, RemoteService, VehicleClient,
};

#[derive(Debug, Parser)]
#[command(name = "connecteddrive", version, about)]
struct Cli {
    /// Print all values that were received
    #[arg(short = 'p', long = "printall")]
    print_all: bool,

    /// Execute a remote service (climate, lock, unlock, light, horn)
    #[arg(short = 'e', long = "execservice", value_name = "SERVICE")]
    service: Option<RemoteService>,

    /// Send a message to the car
    #[arg(
        short = 's',
        long = "sendmesg",
        num_args = 2,
        value_names = ["SUBJECT", "MESSAGE"]
    )]
    message: Option<Vec<String>>,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let status = run(cli).await;

    info!(status = %status, "connecteddrive finished");
    ExitCode::from(status.code())
}

async fn run(cli: Cli) -> ExitStatus {
    info!("connecteddrive starting");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitStatus::Failure;
        }
    };

    let store: Arc<dyn ItemStore> = match OpenHabStore::new(&config.store_url) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!(error = %e, "Failed to create item store client");
            return ExitStatus::Failure;
        }
    };

    let credential = match Credential::load(store.as_ref()).await {
        Ok(credential) => credential,
        Err(e) => {
            error!(error = %e, store = %config.store_url, "Failed to read account from openHAB");
            return ExitStatus::Failure;
        }
    };

    let manager = match CredentialManager::new(&config, store.clone()) {
        Ok(manager) => manager,
        Err(e) => return e.exit_status(),
    };

    let credential = match manager.resolve_token(credential).await {
        Ok(credential) => credential,
        Err(e) => {
            error!(error = %e, "Authentication failed");
            if e.exit_status() == ExitStatus::PermissionDenied {
                eprintln!("could not authenticate, user or password wrong?");
            }
            return e.exit_status();
        }
    };

    let api = match VehicleClient::new(&config, &credential) {
        Ok(api) => api,
        Err(e) => return e.exit_status(),
    };

    // Don't query data and execute a service in the same run, it takes too long
    if let Some(service) = cli.service {
        execute_service(api, service).await
    } else if let Some(message) = cli.message {
        send_message(&api, &message).await
    } else {
        query_data(&api, store.as_ref(), cli.print_all).await
    }
}

async fn execute_service(api: VehicleClient, service: RemoteService) -> ExitStatus {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let report = CommandExecutor::new(api)
        .execute_until_cancelled(service, &cancel)
        .await;
    report.outcome.exit_status()
}

async fn send_message(api: &VehicleClient, message: &[String]) -> ExitStatus {
    let (subject, body) = match message {
        [subject, body] => (subject.as_str(), body.as_str()),
        _ => return ExitStatus::Failure,
    };

    match api.send_message(subject, body).await {
        Ok(()) => {
            info!(subject = subject, "Message sent to vehicle");
            ExitStatus::Success
        }
        Err(e) => {
            error!(error = %e, "Failed to send message");
            e.exit_status()
        }
    }
}

async fn query_data(api: &VehicleClient, store: &dyn ItemStore, print_all: bool) -> ExitStatus {
    let report = telemetry::query(api, store).await;
    if print_all {
        for (key, value) in &report.received {
            println!("{} {}", key, value);
        }
    }
    report.status
}
