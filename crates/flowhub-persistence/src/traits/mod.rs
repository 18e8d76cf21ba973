//! Persistence traits for the storage abstraction layer
//!
//! These traits define the contract between the service layer and the
//! backing store. The SQL backend (MySQL/PostgreSQL via SeaORM) is the
//! reference implementation.

pub mod application;

pub use application::ApplicationPersistence;

use async_trait::async_trait;

/// Unified persistence service trait
///
/// The main interface for all storage operations.
#[async_trait]
pub trait PersistenceService: ApplicationPersistence + Send + Sync {
    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
