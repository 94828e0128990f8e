//! Command-line and environment overrides.
//!
//! Flags (and their `UV_KERNELS_*` environment variables, parsed by clap)
//! take precedence over the config file.

use std::path::PathBuf;

use super::schema::DiscoveryConfig;

/// Values that override the loaded configuration when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Replaces `roots` when non-empty.
    pub roots: Vec<PathBuf>,
    /// Forces the direct-interpreter launch strategy.
    pub direct: bool,
    /// Replaces `max_kernels`.
    pub max_kernels: Option<usize>,
}

impl ConfigOverrides {
    /// Apply these overrides on top of `config`.
    pub fn apply(&self, mut config: DiscoveryConfig) -> DiscoveryConfig {
        if !self.roots.is_empty() {
            config.roots = self.roots.clone();
        }
        if self.direct {
            config.use_uv_run = false;
        }
        if let Some(max) = self.max_kernels {
            config.max_kernels = max;
        }
        config
    }
}
