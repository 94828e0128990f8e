//! List command implementation.
//!
//! The `uv-kernels list` command waits for the project scan (bounded by
//! `--timeout`) and prints every available kernel name.

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::args::ListArgs;
use crate::config::DiscoveryConfig;
use crate::detection::{is_discovered_name, ProjectRecord};
use crate::error::{KernelError, Result};
use crate::registry::{DiscoveryRegistry, InstalledKernelSpecs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// One row of `list` output.
#[derive(Debug, Clone, Serialize)]
pub struct KernelEntry {
    /// Kernel name.
    pub name: String,
    /// Kernelspec directory or project directory.
    pub resource_dir: PathBuf,
    /// Whether the kernel comes from a scanned project.
    pub discovered: bool,
    /// Display name, for discovered kernels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    complete: bool,
    kernels: &'a [KernelEntry],
}

/// The list command implementation.
pub struct ListCommand {
    config: DiscoveryConfig,
    kernel_dirs: Vec<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command searching the standard kernel directories.
    pub fn new(config: DiscoveryConfig, args: ListArgs) -> Self {
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
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    /// Rows for one snapshot of discovered projects.
    fn entries(
        registry: &DiscoveryRegistry,
        discovered: Vec<ProjectRecord>,
    ) -> Result<Vec<KernelEntry>> {
        let specs = registry.merge_kernel_specs(&discovered)?;
        let records: HashMap<String, ProjectRecord> = discovered
            .into_iter()
            .map(|r| (r.kernel_name(), r))
            .collect();

        let entries = specs
            .into_iter()
            .map(|(name, resource_dir)| {
                let record = is_discovered_name(&name)
                    .then(|| records.get(&name))
                    .flatten()
                    .filter(|r| r.directory() == resource_dir.as_path());
                KernelEntry {
                    discovered: record.is_some(),
                    display_name: record.map(ProjectRecord::display_name),
                    name,
                    resource_dir,
                }
            })
            .collect();
        Ok(entries)
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = InstalledKernelSpecs::with_dirs(self.kernel_dirs.clone());
        let mut registry = DiscoveryRegistry::new(&self.config, Box::new(source));

        let mut spinner = ui.start_spinner("Scanning for uv projects...");
        let complete = registry.wait_for_scan(Duration::from_secs(self.args.timeout));
        let discovered = registry.discovered();
        let entries = Self::entries(&registry, discovered)?;
        registry.shutdown();

        let found = entries.iter().filter(|e| e.discovered).count();
        if complete {
            spinner.finish_success(&format!("Found {} project kernel(s)", found));
        } else {
            spinner.finish_warning(&format!(
                "Scan still running after {}s; showing {} project kernel(s) found so far",
                self.args.timeout, found
            ));
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&ListOutput {
                complete,
                kernels: &entries,
            })
            .map_err(|e| KernelError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            ui.message("No kernels found.");
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        for entry in &entries {
            let line = match &entry.display_name {
                Some(display) => format!(
                    "{}  {}  {}",
                    theme.info.apply_to(&entry.name),
                    display,
                    theme.dim.apply_to(entry.resource_dir.display())
                ),
                None => theme.highlight.apply_to(&entry.name).to_string(),
            };
            ui.output(&line);
        }

        if !complete {
            ui.warning("Results may be incomplete; raise --timeout to wait longer.");
        }

        Ok(CommandResult::success())
    }
}
