//! Core functionality for the front-end RF info stack.
//!
//! This crate provides the error kinds every front-end operation can raise,
//! the node configuration, and logging initialization shared by the other
//! workspace members.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, ConfigError, DeviceConfig, LoggingConfig, ServantConfig};
pub use error::{ErrorKind, FrontendError, Result};
