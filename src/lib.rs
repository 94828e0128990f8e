//! uv-kernels - Jupyter kernels for every uv project on disk.
//!
//! A background scan walks the configured root directories looking for
//! `pyproject.toml` files that declare `ipykernel` and sit next to a `.venv`
//! with an executable interpreter. Each such project becomes a kernel named
//! `uv_kernel_...`, listed alongside the kernels Jupyter already knows about.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and overrides
//! - [`detection`] - Project qualification and naming
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Kernel listing and resolution
//! - [`scanner`] - Background directory scanning
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use uv_kernels::detection::ProjectRecord;
//!
//! let record = ProjectRecord::new("/srv/data/app/pyproject.toml");
//! assert!(record.kernel_name().starts_with("uv_kernel_"));
//! assert_eq!(record.display_name(), "data/app");
//! ```
//!
//! For scanning real directories, see the integration tests.

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod registry;
pub mod scanner;
pub mod ui;

pub use error::{KernelError, Result};
