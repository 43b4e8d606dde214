//! # bug-server
//!
//! axum HTTP API over the bug store.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/bugs` | list, newest first |
//! | `GET /api/bugs/{id}` | fetch one |
//! | `POST /api/bugs` | create |
//! | `PUT /api/bugs/{id}` | partial update |
//! | `DELETE /api/bugs/{id}` | hard delete |
//! | `GET /api/health` | liveness |
//! | `GET /api/health/db` | database round trip |

pub mod error;
pub mod routes;
pub mod state;

use std::future::Future;

use axum::ServiceExt;
use axum::extract::Request;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

pub use routes::{App, construct_app, construct_router};
pub use state::AppState;

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!(%address, "server running");
    }
    let app = ServiceExt::<Request>::into_make_service(construct_app(state));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server shut down");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
