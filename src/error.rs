//! Error types for uv-kernels operations.
//!
//! This module defines [`KernelError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Problems with a single candidate project (unreadable or malformed
//!   `pyproject.toml`, missing `.venv`) never surface here; they are logged
//!   and the project is skipped
//! - Only configuration loading and kernel name resolution return errors
//! - Use `anyhow::Error` (via `KernelError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for uv-kernels operations.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A discovery-prefixed kernel name has no matching project.
    #[error("No discovered project for kernel '{name}'")]
    KernelNotFound { name: String },

    /// The installed kernel spec lookup does not know this name.
    #[error("No such kernel named {name}")]
    NoSuchKernel { name: String },

    /// An installed `kernel.json` could not be parsed.
    #[error("Invalid kernel spec at {path}: {message}")]
    InvalidKernelSpec { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KernelError {
    /// Whether this error means the requested kernel name is unknown,
    /// either to discovery or to the installed kernel specs.
    pub fn is_unknown_kernel(&self) -> bool {
        matches!(self, Self::KernelNotFound { .. } | Self::NoSuchKernel { .. })
    }
}

/// Result type alias for uv-kernels operations.
pub type Result<T> = std::result::Result<T, KernelError>;
