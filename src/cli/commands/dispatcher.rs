//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, ConfigOverrides, DiscoveryConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Exit code for a kernel name nobody knows.
pub const EXIT_UNKNOWN_KERNEL: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
}

impl CommandDispatcher {
    /// Create a dispatcher with an optional explicit config file and the
    /// overrides from global flags.
    pub fn new(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> Self {
        Self {
            config_path,
            overrides,
        }
    }

    /// Explicit config file, if one was given.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load the config file and apply the overrides.
    pub fn load_config(&self) -> Result<DiscoveryConfig> {
        let config = load_config(self.config_path.as_deref())?;
        Ok(self.overrides.apply(config))
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(self.load_config()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Show(args) => {
                let cmd = super::show::ShowCommand::new(self.load_config()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Config(args) => {
                let cmd = super::config::ConfigCommand::new(
                    self.load_config()?,
                    self.config_path.clone(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn load_config_applies_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "max_kernels: 5\nroots: [/data]\n").unwrap();

        let overrides = ConfigOverrides {
            max_kernels: Some(9),
            ..Default::default()
        };
        let dispatcher = CommandDispatcher::new(Some(path), overrides);
        let config = dispatcher.load_config().unwrap();
        assert_eq!(config.max_kernels, 9);
        assert_eq!(config.roots, vec![PathBuf::from("/data")]);
    }

    #[test]
    fn missing_explicit_config_fails_dispatch() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yml");
        let cli = Cli::try_parse_from(["uv-kernels", "config"]).unwrap();
        let dispatcher = CommandDispatcher::new(Some(missing), ConfigOverrides::default());

        let mut ui = MockUI::new();
        let err = dispatcher.dispatch(&cli, &mut ui).unwrap_err();
        assert!(matches!(err, KernelError::ConfigNotFound { .. }));
    }

    #[test]
    fn dispatches_config_command() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "use_uv_run: false\n").unwrap();
        let cli = Cli::try_parse_from(["uv-kernels", "config", "--json"]).unwrap();
        let dispatcher = CommandDispatcher::new(Some(path), ConfigOverrides::default());

        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_output("\"use_uv_run\": false"));
    }
}
