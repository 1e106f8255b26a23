//! Business logic services

pub mod inventory;
pub mod stats;

use crate::{config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub inventory: inventory::InventoryService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending: LendingConfig) -> Self {
        Self {
            inventory: inventory::InventoryService::new(repository.clone(), lending),
            stats: stats::StatsService::new(repository),
        }
    }
}
