//! Shelfmark Library Lending Core
//!
//! The bookkeeping core of a small library-management demo: an in-memory
//! catalog and borrow ledger behind store traits, with services for lending
//! operations and inventory statistics. A presentation layer embeds
//! [`AppState`] and calls the services directly; there is no network surface.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared with the embedding presentation layer
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire up the demo stack: seeded in-memory store plus services
    pub fn new(config: AppConfig) -> Self {
        let mut store = repository::memory::MemoryStore::seeded();
        if let Some(ms) = config.store.simulated_latency_ms {
            store = store.with_latency(Duration::from_millis(ms));
        }
        let store = Arc::new(store);
        let repository = repository::Repository::new(store.clone(), store);
        Self::with_repository(config, repository)
    }

    /// Wire services over a caller-supplied repository (real backend or test double)
    pub fn with_repository(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, config.lending.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Initialize tracing for an embedding application
pub fn init_tracing(config: &config::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("shelfmark={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
