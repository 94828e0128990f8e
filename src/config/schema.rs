//! Configuration schema definitions for uv-kernels.
//!
//! Maps the YAML configuration file format onto [`DiscoveryConfig`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::registry::LaunchStrategy;
use crate::scanner::ScanOptions;

use super::loader::expand_home;

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directories scanned for kernel projects (`~` is expanded)
    pub roots: Vec<PathBuf>,

    /// Launch kernels through `uv run` instead of the `.venv` interpreter
    pub use_uv_run: bool,

    /// Maximum number of discovered kernels ever exposed
    pub max_kernels: usize,

    /// Extra directory names to skip while scanning
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Extra kernelspec directories searched before the Jupyter defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kernel_dirs: Vec<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            use_uv_run: true,
            max_kernels: default_max_kernels(),
            ignore: Vec::new(),
            kernel_dirs: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Launch strategy selected by `use_uv_run`.
    pub fn launch_strategy(&self) -> LaunchStrategy {
        if self.use_uv_run {
            LaunchStrategy::UvRun
        } else {
            LaunchStrategy::Direct
        }
    }

    /// Roots with `~` expanded.
    pub fn resolved_roots(&self) -> Vec<PathBuf> {
        self.roots.iter().map(|r| expand_home(r)).collect()
    }

    /// Scanner options for this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(self.resolved_roots()).with_ignored(self.ignore.iter().cloned())
    }
}

fn default_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("~")]
}

/// Default safety limit on discovered kernels.
pub fn default_max_kernels() -> usize {
    100
}
