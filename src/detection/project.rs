//! Discovered kernel projects.
//!
//! A [`ProjectRecord`] is created once per scan for every qualifying
//! `pyproject.toml`. Everything else about the project (kernel name, display
//! label, interpreter) is derived from that path.

use std::path::{Component, Path, PathBuf};

use super::environment::{interpreter_path, venv_dir};

/// Prefix reserved for kernel names produced by discovery.
pub const KERNEL_PREFIX: &str = "uv_kernel_";

/// Joins escaped path components inside a kernel name.
const NAME_SEPARATOR: char = '-';

/// Joins the last path components of a display name.
const DISPLAY_SEPARATOR: &str = "/";

/// A project directory that qualified as a kernel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRecord {
    project_file: PathBuf,
}

impl ProjectRecord {
    /// Create a record from the path of its `pyproject.toml`.
    pub fn new(project_file: impl Into<PathBuf>) -> Self {
        Self {
            project_file: project_file.into(),
        }
    }

    /// Path to the project's `pyproject.toml`.
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    /// The project root.
    pub fn directory(&self) -> &Path {
        self.project_file.parent().unwrap_or(&self.project_file)
    }

    /// Stable kernel name derived from the project directory.
    ///
    /// # Example
    ///
    /// ```
    /// use uv_kernels::detection::{ProjectRecord, KERNEL_PREFIX};
    ///
    /// let record = ProjectRecord::new("/srv/work/notebooks/pyproject.toml");
    /// assert!(record.kernel_name().starts_with(KERNEL_PREFIX));
    /// assert_eq!(record.kernel_name(), record.clone().kernel_name());
    /// ```
    pub fn kernel_name(&self) -> String {
        self.kernel_name_with_home(dirs::home_dir().as_deref())
    }

    /// Kernel name computed against an explicit home directory.
    ///
    /// Directories under `home` use their home-relative components. Anything
    /// else uses its absolute components and starts with the separator, so
    /// `~/x` and `/x` never share a name.
    pub fn kernel_name_with_home(&self, home: Option<&Path>) -> String {
        let dir = self.directory();
        let mut name = String::from(KERNEL_PREFIX);

        let relative = home.and_then(|h| dir.strip_prefix(h).ok());
        let (components, absolute) = match relative {
            Some(rel) => (rel, false),
            None => (dir, true),
        };

        let encoded: Vec<String> = components
            .components()
            .filter_map(|c| match c {
                Component::Prefix(p) => Some(escape_component(p.as_os_str().as_encoded_bytes())),
                Component::RootDir | Component::CurDir => None,
                Component::ParentDir => Some("..".to_string()),
                Component::Normal(part) => Some(escape_component(part.as_encoded_bytes())),
            })
            .collect();

        if absolute {
            name.push(NAME_SEPARATOR);
        }
        name.push_str(&encoded.join(&NAME_SEPARATOR.to_string()));
        name
    }

    /// Short human label: the last two components of the project directory.
    pub fn display_name(&self) -> String {
        let parts: Vec<String> = self
            .directory()
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let start = parts.len().saturating_sub(2);
        parts[start..].join(DISPLAY_SEPARATOR)
    }

    /// The project's `.venv` directory.
    pub fn venv_dir(&self) -> PathBuf {
        venv_dir(self.directory())
    }

    /// Interpreter inside the project's `.venv`.
    pub fn interpreter_path(&self) -> PathBuf {
        interpreter_path(&self.venv_dir())
    }
}

/// Whether a kernel name was produced by discovery.
pub fn is_discovered_name(name: &str) -> bool {
    name.starts_with(KERNEL_PREFIX)
}

/// Escape one path component for use in a kernel name.
///
/// ASCII alphanumerics and `.` are kept; every other byte becomes `_xx`.
/// The output never contains the name separator.
fn escape_component(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b.is_ascii_alphanumeric() || b == b'.' {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{:02x}", b));
        }
    }
    out
}
