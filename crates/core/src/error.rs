//! Front-end error kinds
//!
//! Every RF info operation can fail with one of three kinds. They are passed
//! through unchanged from whichever side raised them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised by a front-end operation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FrontendError {
    /// Generic front-end fault, including an unreachable remote side
    #[error("Frontend error: {0}")]
    Frontend(String),

    /// Supplied or internal parameter is invalid
    #[error("Bad parameter: {0}")]
    BadParameter(String),

    /// Operation not implemented by the target device
    #[error("Not supported: {0}")]
    NotSupported(String),
}

/// Discriminant of a [`FrontendError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// [`FrontendError::Frontend`]
    Generic,
    /// [`FrontendError::BadParameter`]
    BadParameter,
    /// [`FrontendError::NotSupported`]
    NotSupported,
}

impl FrontendError {
    /// Generic failure
    pub fn frontend(msg: impl Into<String>) -> Self {
        Self::Frontend(msg.into())
    }

    /// Invalid parameter
    pub fn bad_parameter(msg: impl Into<String>) -> Self {
        Self::BadParameter(msg.into())
    }

    /// Unsupported operation
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrontendError::Frontend(_) => ErrorKind::Generic,
            FrontendError::BadParameter(_) => ErrorKind::BadParameter,
            FrontendError::NotSupported(_) => ErrorKind::NotSupported,
        }
    }

    /// Message carried by the error, without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            FrontendError::Frontend(msg)
            | FrontendError::BadParameter(msg)
            | FrontendError::NotSupported(msg) => msg,
        }
    }
}

/// Result type for front-end operations.
pub type Result<T> = std::result::Result<T, FrontendError>;
