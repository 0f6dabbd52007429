//! Litforge Core - Core data structures for report assembly
//!
//! This module defines the paper and evaluation model shared by the whole
//! litforge system, along with error handling, logging and configuration.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
