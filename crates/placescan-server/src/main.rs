mod api;
mod exports;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(placescan_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.google_api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY not set; searches require a key entered in the form");
    }

    let app = build_app(AppState::new(Arc::clone(&config)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "placescan server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves once the process is asked to stop.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other signal still shuts the server down.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = first_signal(ctrl_c, terminate).await;
    tracing::info!(signal, "draining in-flight searches before exit");
}

async fn first_signal(
    ctrl_c: impl std::future::Future<Output = ()>,
    terminate: impl std::future::Future<Output = ()>,
) -> &'static str {
    tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "SIGTERM",
    }
}

#[cfg(test)]
mod shutdown_tests {
    use std::future::{pending, ready};

    use super::first_signal;

    #[tokio::test]
    async fn reports_ctrl_c() {
        assert_eq!(first_signal(ready(()), pending()).await, "ctrl-c");
    }

    #[tokio::test]
    async fn reports_terminate() {
        assert_eq!(first_signal(pending(), ready(())).await, "SIGTERM");
    }
}
