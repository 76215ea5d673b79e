use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trusty_todo_lists::cli::{Cli, Commands, ConfigAction};
use trusty_todo_lists::config::{ConfigManager, ServerSettings};
use trusty_todo_lists::error::AppError;
use trusty_todo_lists::router::build_router;
use trusty_todo_lists::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut manager = ConfigManager::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            let mut settings = manager.settings()?;
            if let Some(bind) = bind {
                settings.bind_addr = bind.parse()?;
            }
            init_logging(&settings.log_filter)?;
            tokio::runtime::Runtime::new()?.block_on(serve(settings))
        }
        Commands::Config { action } => configure(&mut manager, action),
    }
}

fn configure(manager: &mut ConfigManager, action: ConfigAction) -> Result<(), AppError> {
    match action {
        ConfigAction::Get { key } => println!("{}", manager.get(&key)?),
        ConfigAction::Set { key, value } => {
            manager.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::Unset { key } => {
            manager.unset(&key)?;
            println!("{key} reset to {}", manager.get(&key)?);
        }
        ConfigAction::List => {
            for (key, value, is_default) in manager.list() {
                if is_default {
                    println!("{key} = {value} (default)");
                } else {
                    println!("{key} = {value}");
                }
            }
        }
    }
    Ok(())
}

/// `RUST_LOG` wins over the configured `log.filter`.
fn init_logging(log_filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter))
        .map_err(|e| AppError::Logging(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

async fn serve(settings: ServerSettings) -> Result<(), AppError> {
    let state = AppState::new(&settings);
    state.sessions.start_expiry_sweep(SESSION_SWEEP_INTERVAL);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(
        addr = %settings.bind_addr,
        session_ttl_minutes = settings.session_ttl.num_minutes(),
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
