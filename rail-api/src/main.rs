use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rail_api::{app, AppState};
use rail_store::{app_config::Config, ReservationStore};
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(about = "Train ticket reservation gRPC server")]
struct Args {
    /// Number of seats per section, overrides booking.seats_per_section
    #[arg(long)]
    seats: Option<u32>,
    /// Port to listen on, overrides server.port
    #[arg(long)]
    port: Option<u16>,
}

/// Layer command-line flags over the loaded configuration and re-check it
fn apply(args: &Args, config: &mut Config) -> anyhow::Result<()> {
    if let Some(seats) = args.seats {
        config.booking.seats_per_section = seats;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
        .booking
        .validate()
        .context("Invalid booking configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rail_api=debug,rail_store=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::load().context("Failed to load config")?;
    apply(&args, &mut config)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;

    let store = Arc::new(ReservationStore::new(&config.booking));
    let state = AppState::new(store);

    tracing::info!(
        "Serving {} sections of {} seats at {:.2} per ticket",
        config.booking.sections.len(),
        config.booking.seats_per_section,
        config.booking.ticket_price
    );
    tracing::info!("Listening on {}", addr);

    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(app(state))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
