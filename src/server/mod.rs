//! # HTTP Server for Cheque Layout and Printing
//!
//! Hosts the cheque editor: fill in the form, generate a preview, drag the
//! fields into place, then print the result from the browser.
//!
//! ## Usage
//!
//! ```bash
//! chequebook serve --listen 0.0.0.0:8080 --template cheque.png --accounts accounts.json
//! ```
//!
//! Then open http://localhost:8080 in a browser.

mod handlers;
mod state;
mod static_files;

pub use state::{AppState, EditorSession, SESSION_EXPIRATION_SECS, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

use crate::error::ChequebookError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Reference data
        .route("/api/template", get(handlers::reference::template))
        .route("/api/currencies", get(handlers::reference::currencies))
        .route("/api/layout/:orientation", get(handlers::reference::layout))
        .route("/api/accounts", get(handlers::accounts::list))
        .route("/api/accounts/:id", get(handlers::accounts::lookup))
        // Cheque editor
        .route("/api/cheque/preview", post(handlers::cheque::preview))
        .route("/api/cheque/:id", get(handlers::cheque::show))
        .route(
            "/api/cheque/:id/orientation",
            post(handlers::cheque::orientation),
        )
        .route("/api/cheque/:id/drop", post(handlers::cheque::drop))
        .route("/api/cheque/:id/print", post(handlers::cheque::print))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use chequebook::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), chequebook::error::ChequebookError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     template: Some("cheque.png".to_string()),
///     accounts_path: None,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), ChequebookError> {
    let app_state = Arc::new(AppState::from_config(&config).await?);

    tokio::spawn(cleanup_sessions(app_state.clone()));

    let app = router(app_state.clone());

    tracing::info!(
        listen = %config.listen_addr,
        template = config.template.as_deref().unwrap_or("(none)"),
        has_template = app_state.template.is_some(),
        "chequebook server starting"
    );
    println!("Open http://{}/ in your browser", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            ChequebookError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ChequebookError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}

/// Background task to drop idle editor sessions.
async fn cleanup_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let now = Instant::now();

        let mut sessions = state.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_accessed) < expiration);
        let after = sessions.len();
        if before != after {
            tracing::info!(
                expired = before - after,
                remaining = after,
                "cleaned up idle editor sessions"
            );
        }
    }
}
