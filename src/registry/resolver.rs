//! Kernel name listing and resolution.
//!
//! [`DiscoveryRegistry`] merges installed kernels with discovered projects.
//! Names carrying the discovery prefix resolve against the scanner; all other
//! names go to the installed kernel source untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DiscoveryConfig;
use crate::detection::{is_discovered_name, ProjectRecord};
use crate::error::{KernelError, Result};
use crate::scanner::{DirectoryScanner, ScanState};

use super::launch::LaunchStrategy;
use super::source::{InstalledKernelSpecs, KernelSpecSource};
use super::spec::KernelSpec;

/// Kernel registry combining installed specs with discovered projects.
///
/// The scan starts lazily on the first listing or resolution and never
/// blocks these calls; each call sees whatever the scanner has found so far.
pub struct DiscoveryRegistry {
    base: Box<dyn KernelSpecSource>,
    scanner: DirectoryScanner,
    strategy: LaunchStrategy,
    max_kernels: usize,
}

impl DiscoveryRegistry {
    /// Create a registry over an explicit installed-kernel source.
    pub fn new(config: &DiscoveryConfig, base: Box<dyn KernelSpecSource>) -> Self {
        Self {
            base,
            scanner: DirectoryScanner::new(config.scan_options()),
            strategy: config.launch_strategy(),
            max_kernels: config.max_kernels,
        }
    }

    /// Create a registry backed by the Jupyter kernel directories.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(
            config,
            Box::new(InstalledKernelSpecs::new(&config.kernel_dirs)),
        )
    }

    /// Launch strategy for discovered kernels.
    pub fn strategy(&self) -> LaunchStrategy {
        self.strategy
    }

    /// Safety limit on discovered kernels.
    pub fn max_kernels(&self) -> usize {
        self.max_kernels
    }

    /// State of the background scan.
    pub fn scan_state(&self) -> ScanState {
        self.scanner.state()
    }

    /// Discovered projects found so far, capped at the safety limit.
    pub fn discovered(&mut self) -> Vec<ProjectRecord> {
        self.scanner.start();
        self.scanner
            .drain()
            .iter()
            .take(self.max_kernels)
            .cloned()
            .collect()
    }

    /// All kernels: name to resource directory.
    ///
    /// Installed kernels win when a discovered name collides with one.
    pub fn find_kernel_specs(&mut self) -> Result<BTreeMap<String, PathBuf>> {
        let discovered = self.discovered();
        self.merge_kernel_specs(&discovered)
    }

    /// Installed kernels merged with an already taken snapshot of discovered
    /// projects. Installed kernels win on collision.
    pub fn merge_kernel_specs(
        &self,
        discovered: &[ProjectRecord],
    ) -> Result<BTreeMap<String, PathBuf>> {
        let mut specs = self.base.find_kernel_specs()?;

        for record in discovered {
            specs
                .entry(record.kernel_name())
                .or_insert_with(|| record.directory().to_path_buf());
        }

        Ok(specs)
    }

    /// Every kernel with its full launch descriptor.
    ///
    /// Installed specs that fail to load are logged and left out. Installed
    /// kernels win when a discovered name collides with one.
    pub fn get_all_specs(&mut self) -> Result<BTreeMap<String, KernelSpec>> {
        let mut specs = BTreeMap::new();

        for name in self.base.find_kernel_specs()?.into_keys() {
            match self.base.get_kernel_spec(&name) {
                Ok(spec) => {
                    specs.insert(name, spec);
                }
                Err(e) => warn!("Skipping kernel {}: {}", name, e),
            }
        }

        for record in self.discovered() {
            specs
                .entry(record.kernel_name())
                .or_insert_with(|| KernelSpec::for_project(&record, self.strategy));
        }

        Ok(specs)
    }

    /// Names of every available kernel.
    pub fn list_available_names(&mut self) -> Result<BTreeSet<String>> {
        Ok(self.find_kernel_specs()?.into_keys().collect())
    }

    /// Resolve a kernel name to its launch descriptor.
    ///
    /// # Errors
    ///
    /// Returns `KernelNotFound` for a discovery-prefixed name with no
    /// matching project among the capped results. Other names fail with
    /// whatever the installed kernel source reports.
    pub fn get_kernel_spec(&mut self, name: &str) -> Result<KernelSpec> {
        if !is_discovered_name(name) {
            return self.base.get_kernel_spec(name);
        }

        let record = self
            .discovered()
            .into_iter()
            .find(|r| r.kernel_name() == name)
            .ok_or_else(|| KernelError::KernelNotFound {
                name: name.to_string(),
            })?;

        debug!(
            "Resolved {} to {} ({})",
            name,
            record.directory().display(),
            self.strategy
        );
        Ok(KernelSpec::for_project(&record, self.strategy))
    }

    /// Block until the scan completes or `timeout` elapses, starting it if
    /// needed. Returns whether the scan is complete.
    pub fn wait_for_scan(&mut self, timeout: Duration) -> bool {
        self.scanner.start();
        self.scanner.wait(timeout)
    }

    /// Forget discovered projects and scan again.
    pub fn rescan(&mut self) {
        self.scanner.rescan();
    }

    /// Stop the scan and wait for its thread.
    pub fn shutdown(&mut self) {
        self.scanner.shutdown();
    }
}

impl std::fmt::Debug for DiscoveryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryRegistry")
            .field("scanner", &self.scanner)
            .field("strategy", &self.strategy)
            .field("max_kernels", &self.max_kernels)
            .finish()
    }
}
