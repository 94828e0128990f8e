//! Configuration file discovery and loading.
//!
//! The configuration lives at `<config dir>/uv-kernels/config.yml` unless a
//! path is given explicitly. A missing default file is not an error; the
//! built-in defaults apply.

use crate::config::schema::DiscoveryConfig;
use crate::error::{KernelError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directory name under the user's config directory.
pub const CONFIG_DIR_NAME: &str = "uv-kernels";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Default location of the user's config file.
pub fn default_config_path() -> Option<PathBuf> {
    Some(
        dirs::config_dir()?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    )
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DiscoveryConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KernelError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            KernelError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`DiscoveryConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<DiscoveryConfig> {
    if content.trim().is_empty() {
        return Ok(DiscoveryConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| KernelError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration from an explicit path, or the default location.
///
/// An explicit path must exist. The default location may be absent.
pub fn load_config(config_override: Option<&Path>) -> Result<DiscoveryConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config_file(&path),
        _ => Ok(DiscoveryConfig::default()),
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    expand_home_with(path, dirs::home_dir().as_deref())
}

/// Expand a leading `~` against an explicit home directory.
///
/// Paths without the shorthand, or with no known home, are returned as-is.
pub fn expand_home_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let mut components = path.components();
    match (components.next(), home) {
        (Some(Component::Normal(first)), Some(home)) if first == "~" => {
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        _ => path.to_path_buf(),
    }
}
