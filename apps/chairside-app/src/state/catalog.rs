//! # Catalog State
//!
//! The service and reward catalogs the app prices against. Loaded once at
//! startup and read-only afterwards, so no mutex needed.

use chairside_core::{RewardCatalog, ServiceCatalog};

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub services: ServiceCatalog,
    pub rewards: RewardCatalog,
}

impl CatalogState {
    pub fn new(services: ServiceCatalog, rewards: RewardCatalog) -> Self {
        CatalogState { services, rewards }
    }

    /// The built-in menu and the standard points rewards.
    pub fn standard() -> Self {
        CatalogState::new(ServiceCatalog::standard(), RewardCatalog::standard())
    }
}
