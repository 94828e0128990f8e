//! Configuration loading for uv-kernels.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Flag and environment overrides in [`overrides`]
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use uv_kernels::config::parse_config;
//!
//! let config = parse_config("roots: [~/notebooks]\nuse_uv_run: false", Path::new("config.yml")).unwrap();
//! assert_eq!(config.max_kernels, 100);
//! assert!(!config.launch_strategy().uses_runner());
//! ```
//!
//! # Configuration File Location
//!
//! `<config dir>/uv-kernels/config.yml`, e.g. `~/.config/uv-kernels/config.yml`
//! on Linux. Pass `--config` to use another file.

pub mod loader;
pub mod overrides;
pub mod schema;

pub use loader::{
    default_config_path, expand_home, expand_home_with, load_config, load_config_file,
    parse_config, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use overrides::ConfigOverrides;
pub use schema::{default_max_kernels, DiscoveryConfig};
