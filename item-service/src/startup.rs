//! Application startup and lifecycle management.
//!
//! The store connection is opened in [`Application::build`] and closed after
//! the HTTP server has drained in [`Application::run_until_stopped`].

use service_core::error::AppError;
use service_core::store::MongoStore;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ItemConfig;
use crate::services::MongoItemRepository;
use crate::{build_router, AppState};

pub struct Application {
    port: u16,
    listener: TcpListener,
    store: MongoStore,
    state: AppState,
}

impl Application {
    pub async fn build(config: ItemConfig) -> Result<Self, AppError> {
        let store = MongoStore::connect(&config.mongodb.uri, &config.mongodb.database).await?;
        let items = MongoItemRepository::new(store.clone(), config.mongodb.collection.clone());

        let state = AppState {
            config: config.clone(),
            items: Arc::new(items),
        };

        // Port 0 binds a random port, used by tests.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, collection = %config.mongodb.collection, "Item service bound");

        Ok(Self {
            port,
            listener,
            store,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until `shutdown` resolves, then close the store connection.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        let served = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await;

        self.store.shutdown().await;

        served.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
