//! API server entry point.

use std::net::SocketAddr;

use api::config::Config;
use event_log::FileEventLog;
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    api::logging::init(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Prepare the event log; appends recreate the directory if needed
    let log = FileEventLog::new(config.event_log.clone());
    match log.ensure_data_dir() {
        Ok(()) => tracing::info!(
            data_dir = %config.event_log.data_dir().display(),
            data_file = %config.event_log.data_file().display(),
            "data directory ready"
        ),
        Err(err) => tracing::warn!(error = %err, "data directory not ready"),
    }

    // 4. Build the application
    let app = api::create_app(api::create_state(log), metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting telemetry API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("server error");

    tracing::info!("shutting down telemetry API");
}
