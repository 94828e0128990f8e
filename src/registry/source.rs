//! Installed kernel specs.
//!
//! [`KernelSpecSource`] is the seam for the kernels that exist independently
//! of discovery. [`InstalledKernelSpecs`] implements it the way Jupyter does:
//! every subdirectory of a `kernels` directory that holds a `kernel.json` is
//! one kernel, named after the directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{KernelError, Result};

use super::spec::KernelSpec;

/// Kernel spec file inside a kernelspec directory.
pub const KERNEL_JSON: &str = "kernel.json";

/// Source of kernels that exist without discovery.
pub trait KernelSpecSource {
    /// Map of kernel name to resource directory.
    fn find_kernel_specs(&self) -> Result<BTreeMap<String, PathBuf>>;

    /// Load the spec for `name`.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchKernel` if the name is unknown.
    fn get_kernel_spec(&self, name: &str) -> Result<KernelSpec>;
}

/// Kernel specs installed in Jupyter's kernel directories.
#[derive(Debug, Clone)]
pub struct InstalledKernelSpecs {
    kernel_dirs: Vec<PathBuf>,
}

impl InstalledKernelSpecs {
    /// Search `extra_dirs` first, then the standard Jupyter locations.
    pub fn new(extra_dirs: &[PathBuf]) -> Self {
        let mut kernel_dirs = extra_dirs.to_vec();
        kernel_dirs.extend(jupyter_kernel_dirs());
        Self { kernel_dirs }
    }

    /// Search exactly the given directories, in order.
    pub fn with_dirs(kernel_dirs: Vec<PathBuf>) -> Self {
        Self { kernel_dirs }
    }

    /// Directories searched, highest priority first.
    pub fn kernel_dirs(&self) -> &[PathBuf] {
        &self.kernel_dirs
    }
}

impl KernelSpecSource for InstalledKernelSpecs {
    fn find_kernel_specs(&self) -> Result<BTreeMap<String, PathBuf>> {
        let mut specs = BTreeMap::new();

        for dir in &self.kernel_dirs {
            if !dir.is_dir() {
                continue;
            }

            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Cannot read kernel directory {}: {}", dir.display(), e);
                    continue;
                }
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if !path.join(KERNEL_JSON).is_file() {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                specs.entry(name.to_lowercase()).or_insert(path);
            }
        }

        debug!("Found {} installed kernel spec(s)", specs.len());
        Ok(specs)
    }

    fn get_kernel_spec(&self, name: &str) -> Result<KernelSpec> {
        let specs = self.find_kernel_specs()?;
        let resource_dir = specs
            .get(&name.to_lowercase())
            .ok_or_else(|| KernelError::NoSuchKernel {
                name: name.to_string(),
            })?;

        load_kernel_spec(name, resource_dir)
    }
}

/// Read `kernel.json` from a kernelspec directory.
pub fn load_kernel_spec(name: &str, resource_dir: &Path) -> Result<KernelSpec> {
    let path = resource_dir.join(KERNEL_JSON);
    let content = fs::read_to_string(&path)?;
    let mut spec =
        KernelSpec::from_json(name, &content).map_err(|e| KernelError::InvalidKernelSpec {
            path: path.clone(),
            message: e.to_string(),
        })?;
    spec.set_resource_dir(resource_dir.to_path_buf());
    Ok(spec)
}

/// Standard Jupyter kernel directories, highest priority first.
///
/// `$JUPYTER_PATH` entries, then the user data directory, then the system
/// directories.
pub fn jupyter_kernel_dirs() -> Vec<PathBuf> {
    let mut data_dirs: Vec<PathBuf> = Vec::new();

    if let Some(paths) = std::env::var_os("JUPYTER_PATH") {
        data_dirs.extend(std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
    }

    if let Some(user) = user_data_dir() {
        data_dirs.push(user);
    }

    #[cfg(unix)]
    {
        data_dirs.push(PathBuf::from("/usr/local/share/jupyter"));
        data_dirs.push(PathBuf::from("/usr/share/jupyter"));
    }

    #[cfg(windows)]
    if let Some(program_data) = std::env::var_os("PROGRAMDATA") {
        data_dirs.push(PathBuf::from(program_data).join("jupyter"));
    }

    data_dirs.into_iter().map(|d| d.join("kernels")).collect()
}

#[cfg(target_os = "macos")]
fn user_data_dir() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join("Library").join("Jupyter"))
}

#[cfg(not(target_os = "macos"))]
fn user_data_dir() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join("jupyter"))
}
