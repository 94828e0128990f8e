//! Kernel registry for uv-kernels.
//!
//! This module combines the kernels Jupyter already knows about with the
//! projects found by the scanner:
//! - [`source`] - installed kernel specs (`kernel.json` directories)
//! - [`resolver`] - [`DiscoveryRegistry`], listing and name resolution
//! - [`spec`] - the [`KernelSpec`] launch descriptor
//! - [`launch`] - direct-interpreter vs `uv run` commands
//!
//! # Resolution Order
//!
//! 1. Names without the `uv_kernel_` prefix go to the installed specs
//! 2. Prefixed names are matched against discovered projects
//!
//! # Example
//!
//! ```
//! use uv_kernels::config::DiscoveryConfig;
//! use uv_kernels::registry::{DiscoveryRegistry, InstalledKernelSpecs};
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! let config = DiscoveryConfig {
//!     roots: vec![dir.path().to_path_buf()],
//!     ..Default::default()
//! };
//! let installed = InstalledKernelSpecs::with_dirs(vec![]);
//! let mut registry = DiscoveryRegistry::new(&config, Box::new(installed));
//!
//! let names = registry.list_available_names().unwrap();
//! assert!(names.is_empty());
//! ```

pub mod launch;
pub mod resolver;
pub mod source;
pub mod spec;

pub use launch::{LaunchStrategy, BASE_ARGV, CONNECTION_FILE, UV_RUN_ARGV};
pub use resolver::DiscoveryRegistry;
pub use source::{
    jupyter_kernel_dirs, load_kernel_spec, InstalledKernelSpecs, KernelSpecSource, KERNEL_JSON,
};
pub use spec::{InterruptMode, KernelMetadata, KernelSpec, KernelSpecBuilder};
