pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::{net::SocketAddr, sync::Arc};
use tasklinex_auth::TokenSigner;
use tasklinex_db::AccountStore;
use tower_http::trace::TraceLayer;
use tracing::info;

use service::AuthService;

/// Application state shared across handlers
pub struct AppState {
    pub auth: AuthService,
}

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Symmetric secret for signing access tokens; loaded from external
    /// configuration at startup, never defaulted in code
    pub jwt_secret: String,
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server over a connected (and migrated) database
    pub fn new(config: ApiServerConfig, db: DatabaseConnection) -> Self {
        let store = AccountStore::new(db);
        let signer = Arc::new(TokenSigner::new(config.jwt_secret.as_bytes()));
        let state = Arc::new(AppState {
            auth: AuthService::new(store, signer),
        });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/signup", post(handlers::signup))
            .route("/login", post(handlers::login))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}
