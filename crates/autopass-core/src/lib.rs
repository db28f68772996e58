//! # autopass-core
//!
//! Core configuration and utilities for autopass.
//!
//! This crate provides functionality shared by the autopass crates:
//!
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Paths**: Store, config, and cache location resolution
//! - **Utilities**: Environment handling and redacted secret strings

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;
