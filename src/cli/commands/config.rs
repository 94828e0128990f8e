//! Config command implementation.
//!
//! The `uv-kernels config` command shows the resolved configuration, after
//! the config file and the global flags have been applied.

use std::path::PathBuf;

use crate::cli::args::ConfigArgs;
use crate::config::{default_config_path, DiscoveryConfig};
use crate::error::{KernelError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    config: DiscoveryConfig,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    ///
    /// `config_path` is the explicit `--config` file, if any.
    pub fn new(config: DiscoveryConfig, config_path: Option<PathBuf>, args: ConfigArgs) -> Self {
        Self {
            config,
            config_path,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }

    /// The file the configuration was read from, if one exists.
    fn source_path(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(|| default_config_path().filter(|p| p.exists()))
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.source_path() {
            Some(path) => ui.message(&format!("# {}", path.display())),
            None => ui.message("# built-in defaults"),
        }

        let rendered = if self.args.json {
            serde_json::to_string_pretty(&self.config).map_err(|e| KernelError::Other(e.into()))?
        } else {
            serde_yaml::to_string(&self.config).map_err(|e| KernelError::Other(e.into()))?
        };
        ui.output(rendered.trim_end());

        Ok(CommandResult::success())
    }
}
