//! Flowhub Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity definitions
//! - Persistence trait abstractions for application storage
//! - Domain model types for persistence operations

pub mod entity;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

// Re-export persistence traits
pub use traits::{ApplicationPersistence, PersistenceService};

// Re-export SQL backend
pub use sql::ExternalDbPersistService;

// Re-export model types
pub use model::{
    ApplicationFilter, ApplicationInfo, ApplicationMetrics, DeployMode, DeploymentMapping,
    OptionState, Page,
};
