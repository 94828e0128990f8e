//! Show command implementation.
//!
//! The `uv-kernels show NAME` command prints the kernel.json that would be
//! used to launch a kernel.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::args::ShowArgs;
use crate::config::DiscoveryConfig;
use crate::detection::is_discovered_name;
use crate::error::{KernelError, Result};
use crate::registry::{DiscoveryRegistry, InstalledKernelSpecs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_UNKNOWN_KERNEL};

/// The show command implementation.
pub struct ShowCommand {
    config: DiscoveryConfig,
    kernel_dirs: Vec<PathBuf>,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command searching the standard kernel directories.
    pub fn new(config: DiscoveryConfig, args: ShowArgs) -> Self {
        let kernel_dirs = InstalledKernelSpecs::new(&config.kernel_dirs)
            .kernel_dirs()
            .to_vec();
        Self {
            config,
            kernel_dirs,
            args,
        }
    }

    /// Search exactly `kernel_dirs` for installed kernels.
    pub fn with_kernel_dirs(mut self, kernel_dirs: Vec<PathBuf>) -> Self {
        self.kernel_dirs = kernel_dirs;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ShowArgs {
        &self.args
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = InstalledKernelSpecs::with_dirs(self.kernel_dirs.clone());
        let mut registry = DiscoveryRegistry::new(&self.config, Box::new(source));

        // Installed names resolve without a scan.
        if is_discovered_name(&self.args.name) {
            let mut spinner = ui.start_spinner("Scanning for uv projects...");
            if registry.wait_for_scan(Duration::from_secs(self.args.timeout)) {
                spinner.clear();
            } else {
                spinner.finish_warning(&format!(
                    "Scan still running after {}s",
                    self.args.timeout
                ));
            }
        }

        let resolved = registry.get_kernel_spec(&self.args.name);
        registry.shutdown();

        let spec = match resolved {
            Ok(spec) => spec,
            Err(e) if e.is_unknown_kernel() => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_UNKNOWN_KERNEL));
            }
            Err(e) => return Err(e),
        };

        if let Some(dir) = spec.resource_dir() {
            ui.message(&format!("# {}", dir.display()));
        }
        let json = spec
            .to_json_pretty()
            .map_err(|e| KernelError::Other(e.into()))?;
        ui.output(&json);

        Ok(CommandResult::success())
    }
}
