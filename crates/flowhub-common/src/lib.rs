//! Flowhub Common - Shared types for Flowhub components
//!
//! This crate provides the foundational types used across all Flowhub
//! components:
//! - Error types

pub mod error;

// Re-exports for convenience
pub use error::FlowhubError;
