//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::repository::MemoryRepository;
use crate::resources::{Menus, Relationships, Schematics};

/// Application state shared across handlers
///
/// Holds the configuration and one repository per resource type. Cloning is
/// cheap; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    menus: Arc<MemoryRepository<Menus>>,
    relationships: Arc<MemoryRepository<Relationships>>,
    schematics: Arc<MemoryRepository<Schematics>>,
}

impl AppState {
    /// Create a new state with empty repositories
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            menus: Arc::new(MemoryRepository::new()),
            relationships: Arc::new(MemoryRepository::new()),
            schematics: Arc::new(MemoryRepository::new()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the menus repository
    pub fn menus(&self) -> Arc<MemoryRepository<Menus>> {
        Arc::clone(&self.menus)
    }

    /// Get the relationships repository
    pub fn relationships(&self) -> Arc<MemoryRepository<Relationships>> {
        Arc::clone(&self.relationships)
    }

    /// Get the schematics repository
    pub fn schematics(&self) -> Arc<MemoryRepository<Schematics>> {
        Arc::clone(&self.schematics)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
