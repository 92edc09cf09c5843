//! HTTP server for the studio API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::models::AdminModel;
use crate::router::{create_router, AppState};
use crate::store::{ImageStore, InviteSweeper, MemoryImageStore, MemoryStudioStore, StudioStore};

/// How often expired invitations are swept.
const INVITE_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Studio API server.
pub struct StudioServer {
    config: Arc<Config>,
    store: Arc<dyn StudioStore>,
    images: Arc<dyn ImageStore>,
}

impl StudioServer {
    /// Creates a new server with in-memory storage.
    pub fn new(config: Config) -> Self {
        let store: Arc<dyn StudioStore> = Arc::new(MemoryStudioStore::new());
        let images: Arc<dyn ImageStore> = Arc::new(MemoryImageStore::new());

        Self {
            config: Arc::new(config),
            store,
            images,
        }
    }

    /// Creates a new server with custom storage.
    pub fn with_storage(
        config: Config,
        store: Arc<dyn StudioStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            images,
        }
    }

    /// Runs the server.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_address().parse()?;

        self.seed_accounts().await?;

        // Sweep expired invitations in the background.
        let sweeper = InviteSweeper::new(self.store.clone(), INVITE_SWEEP_INTERVAL);
        tokio::spawn(async move { sweeper.run().await });

        let state = AppState {
            config: self.config.clone(),
            store: self.store.clone(),
            images: self.images.clone(),
        };

        let app = create_router(state)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
                    .expose_headers(Any),
            )
            .layer(TraceLayer::new_for_http());

        info!("Studio service is starting at http://{}", addr);
        info!(
            "Bootstrap admin: {}",
            self.config
                .accounts
                .first()
                .map(|a| a.email.as_str())
                .unwrap_or("unknown")
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Creates the bootstrap administrator accounts from configuration.
    async fn seed_accounts(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for account in &self.config.accounts {
            if self.store.get_admin_by_email(&account.email).await.is_ok() {
                continue;
            }
            let admin = AdminModel::new(
                account.email.clone(),
                "Studio admin".to_string(),
                account.key.clone(),
                None,
            );
            self.store.create_admin(admin).await?;
        }
        Ok(())
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        self.config.bind_address()
    }

    /// Returns the base URL for the service.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}

/// Builder for creating a studio server.
pub struct StudioServerBuilder {
    config: Config,
    store: Option<Arc<dyn StudioStore>>,
    images: Option<Arc<dyn ImageStore>>,
}

impl StudioServerBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            store: None,
            images: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the default listing page size.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.config.page_size = page_size.max(1);
        self
    }

    /// Sets the studio store.
    pub fn store(mut self, store: Arc<dyn StudioStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the image store.
    pub fn images(mut self, images: Arc<dyn ImageStore>) -> Self {
        self.images = Some(images);
        self
    }

    /// Builds the server.
    pub fn build(self) -> StudioServer {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStudioStore::new()));
        let images = self
            .images
            .unwrap_or_else(|| Arc::new(MemoryImageStore::new()));

        StudioServer::with_storage(self.config, store, images)
    }
}

impl Default for StudioServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
