// src/main.rs
//
// coffeehouse binary: HTTP server and query metadata check

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coffeehouse::db::{get_connection, get_database_stats, verify_database_integrity};
use coffeehouse::{aot, build_router, open_database, AppConfig, AppState, CONTRACTS};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "coffeehouse", about = "Coffee shop API and query metadata checks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Check that the query metadata covers every repository method
    VerifyAot {
        /// Root of the metadata artifacts; defaults to COFFEE_AOT_METADATA_DIR
        #[arg(long, value_name = "DIR")]
        metadata_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let outcome = AppConfig::from_env()
        .context("failed to load configuration")
        .and_then(|config| match cli.command.unwrap_or(Command::Serve) {
            Command::Serve => serve(config),
            Command::VerifyAot { metadata_dir } => {
                verify_aot(metadata_dir.unwrap_or(config.aot_metadata_dir))
            }
        });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("coffeehouse failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn verify_aot(metadata_dir: PathBuf) -> Result<()> {
    info!(metadata_dir = %metadata_dir.display(), contracts = CONTRACTS.len(), "verifying query metadata");

    let failures = aot::validate_all(CONTRACTS, &metadata_dir);
    for failure in &failures {
        error!("{failure}");
    }

    if failures.is_empty() {
        info!("all repository methods have query metadata");
        Ok(())
    } else {
        anyhow::bail!("{} repository contract(s) failed verification", failures.len())
    }
}

fn serve(config: AppConfig) -> Result<()> {
    tokio::runtime::Runtime::new()
        .context("failed to start async runtime")?
        .block_on(run_server(config))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let pool = open_database(
        &config.database_url,
        config.db_max_connections,
        config.seed_data,
    )
    .with_context(|| format!("failed to open database {}", config.database_url))?;

    {
        let conn = get_connection(&pool)?;
        verify_database_integrity(&conn).context("database integrity check failed")?;
        let stats = get_database_stats(&conn)?;
        info!(
            coffees = stats.coffee_count,
            orders = stats.order_count,
            order_items = stats.order_item_count,
            size_bytes = stats.size_bytes,
            "database ready"
        );
    }

    let app = build_router(AppState::from_pool(Arc::new(pool)));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        bind_addr = %config.bind_addr,
        database = %config.database_url,
        "coffeehouse API started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("coffeehouse API stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coffeehouse=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
