//! Kernel project qualification.
//!
//! A directory is a kernel project when its `pyproject.toml` lists
//! `ipykernel` under `project.dependencies` and it has a `.venv` with a
//! runnable interpreter. Reading or parsing failures fail closed: they are
//! logged and the project simply does not qualify.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{KernelError, Result};

use super::environment::has_interpreter;

/// Marker file identifying a project root.
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Package a project must depend on to be usable as a kernel.
pub const KERNEL_PACKAGE: &str = "ipykernel";

/// Dotted key path of the dependency list inside `pyproject.toml`.
pub const DEPENDENCIES_KEY: &str = "project.dependencies";

/// Leading distribution name of a PEP 508 requirement string.
static REQUIREMENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)")
        .expect("REQUIREMENT_NAME must compile")
});

static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("NAME_SEPARATORS must compile"));

/// Decides whether a `pyproject.toml` belongs to a kernel project.
///
/// # Example
///
/// ```
/// use uv_kernels::detection::ProjectQualifier;
///
/// let qualifier = ProjectQualifier::new();
/// assert!(qualifier.matches_dependency("ipykernel>=6.29"));
/// assert!(!qualifier.matches_dependency("ipykernel_launcher"));
/// ```
#[derive(Debug, Clone)]
pub struct ProjectQualifier {
    package: String,
}

impl ProjectQualifier {
    /// Qualifier requiring `ipykernel`.
    pub fn new() -> Self {
        Self::for_package(KERNEL_PACKAGE)
    }

    /// Qualifier requiring an arbitrary distribution.
    pub fn for_package(package: &str) -> Self {
        Self {
            package: normalize_name(package),
        }
    }

    /// The normalized package name this qualifier looks for.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Full check: dependency declared and interpreter present.
    pub fn qualifies(&self, pyproject_file: &Path) -> bool {
        let Some(project_dir) = pyproject_file.parent() else {
            return false;
        };

        if !self.declares_dependency(pyproject_file) {
            debug!("{} does not depend on {}", pyproject_file.display(), self.package);
            return false;
        }

        if !has_interpreter(project_dir) {
            debug!("{} has no usable .venv", project_dir.display());
            return false;
        }

        true
    }

    /// Whether the file declares the required package. Never fails.
    pub fn declares_dependency(&self, pyproject_file: &Path) -> bool {
        match read_dependencies(pyproject_file) {
            Ok(deps) => deps.iter().any(|dep| self.matches_dependency(dep)),
            Err(e) => {
                warn!("Error when reading {}: {}", pyproject_file.display(), e);
                false
            }
        }
    }

    /// Whether a single requirement string names the required package.
    ///
    /// Only the distribution name counts, so `ipykernel[extra]>=6` matches
    /// but `ipykernel-extras` and `my-ipykernel` do not.
    pub fn matches_dependency(&self, requirement: &str) -> bool {
        requirement_name(requirement).is_some_and(|name| name == self.package)
    }
}

impl Default for ProjectQualifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the declared dependency list from a `pyproject.toml` file.
///
/// A missing `project.dependencies` key yields an empty list.
pub fn read_dependencies(pyproject_file: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(pyproject_file)?;
    parse_dependencies(&content).map_err(|e| KernelError::Other(anyhow::Error::new(e)))
}

/// Parse `pyproject.toml` content and extract `project.dependencies`.
///
/// Non-string entries are ignored.
pub fn parse_dependencies(content: &str) -> std::result::Result<Vec<String>, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;

    let deps = match lookup_dotted(&table, DEPENDENCIES_KEY) {
        Some(toml::Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    Ok(deps)
}

fn lookup_dotted<'a>(table: &'a toml::Table, dotted: &str) -> Option<&'a toml::Value> {
    let mut parts = dotted.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Normalized distribution name of a requirement string, if it has one.
pub fn requirement_name(requirement: &str) -> Option<String> {
    REQUIREMENT_NAME
        .captures(requirement)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_name(m.as_str()))
}

/// Normalize a distribution name: lowercase, separator runs become `-`.
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS
        .replace_all(&name.trim().to_lowercase(), "-")
        .into_owned()
}
