//! Shared errors, field-name constants and configuration used across the belgraph crates.

pub mod error;
pub mod constants;
pub mod config;

// Re-export commonly used types
pub use config::GroundingConfig;
pub use error::{BelError, Result};
