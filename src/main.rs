use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use folio_gate::config::Args;
use folio_gate::handlers::build_router;
use folio_gate::state::{AppState, janitor};
use folio_gate::submit::{HttpSubmitter, LogSubmitter, Submitter};
use folio_gate::worker::QueuedSubmitter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // where accepted messages end up
    let sink: Arc<dyn Submitter> = match &args.forward_url {
        Some(url) => {
            let http = HttpSubmitter::new(reqwest::Client::new(), url.clone());
            info!("Forwarding messages to {}", http.endpoint());
            Arc::new(http)
        }
        None => {
            info!("No forward URL set - messages are only logged");
            Arc::new(LogSubmitter)
        }
    };

    // spawn the delivery worker
    let delivery = QueuedSubmitter::spawn(sink);

    let limits = args.rate_limits();
    let state = Arc::new(AppState::new(limits, Arc::new(delivery)));

    tokio::spawn(janitor(
        Arc::clone(&state),
        Duration::from_secs(args.janitor_interval.max(1)),
    ));

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Contact relay running on http://localhost:{}", args.port);
    info!(
        "Rate limit: {} submissions per {} seconds",
        limits.max_attempts, args.cooldown_secs
    );
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
