//! Router assembly and HTTP server with graceful shutdown

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::config::Config;
use crate::error::Result;
use crate::handlers::resource_routes;
use crate::resources::{AdminResource, Menus, Relationships, Schematics};
use crate::state::AppState;

/// Build the admin panel router, mounting every resource under the
/// configured route prefix
///
/// Authentication middleware is layered on by the host application; this
/// router only consumes the principal it leaves in the request extensions.
pub fn panel_router(state: &AppState) -> Router {
    let panel = Router::new()
        .nest(
            &format!("/{}", Menus::SEGMENT),
            resource_routes::<Menus>(state.menus()),
        )
        .nest(
            &format!("/{}", Relationships::SEGMENT),
            resource_routes::<Relationships>(state.relationships()),
        )
        .nest(
            &format!("/{}", Schematics::SEGMENT),
            resource_routes::<Schematics>(state.schematics()),
        );

    match normalize_prefix(&state.config().panel.route_prefix) {
        Some(prefix) => Router::new().nest(&prefix, panel),
        None => panel,
    }
}

/// Turn the configured prefix into a nestable path; an empty prefix mounts
/// the panel at the root
fn normalize_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the server with the given router
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.service.port));

        tracing::info!("Starting {} on {}", self.config.service.name, addr);

        let body_limit = self.config.service.body_limit_mb * 1024 * 1024;

        // Layers are applied in reverse order (bottom layer is innermost)
        let app = app
            .layer(TimeoutLayer::with_status_code(
                http::StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(self.config.service.timeout_secs),
            ))
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new())
                    .on_response(DefaultOnResponse::new()),
            )
            .layer(CatchPanicLayer::new());

        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("acacia"), Some("/acacia".to_string()));
        assert_eq!(normalize_prefix("/acacia/"), Some("/acacia".to_string()));
        assert_eq!(normalize_prefix(""), None);
        assert_eq!(normalize_prefix("/"), None);
    }

    #[test]
    fn test_panel_router_builds_with_default_config() {
        let state = AppState::default();
        let _router = panel_router(&state);
    }

    #[test]
    fn test_panel_router_builds_with_empty_prefix() {
        let mut config = Config::default();
        config.panel.route_prefix = String::new();
        let state = AppState::new(config);
        let _router = panel_router(&state);
    }
}
