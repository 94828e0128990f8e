//! Materialized environment resolution.
//!
//! A project's environment is the `.venv` directory next to its
//! `pyproject.toml`. The interpreter lives at a platform-specific location
//! inside it.

use std::path::{Path, PathBuf};

/// Name of the environment directory created by `uv sync`.
pub const VENV_DIR: &str = ".venv";

#[cfg(windows)]
const SCRIPTS_DIR: &str = "Scripts";
#[cfg(not(windows))]
const SCRIPTS_DIR: &str = "bin";

#[cfg(windows)]
const EXE_SUFFIX: &str = ".exe";
#[cfg(not(windows))]
const EXE_SUFFIX: &str = "";

/// Path to the Python interpreter inside an environment root.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use uv_kernels::detection::interpreter_path;
///
/// let python = interpreter_path(Path::new("/work/app/.venv"));
/// assert!(python.starts_with("/work/app/.venv"));
/// ```
pub fn interpreter_path(venv_root: &Path) -> PathBuf {
    venv_root
        .join(SCRIPTS_DIR)
        .join(format!("python{}", EXE_SUFFIX))
}

/// The environment directory belonging to a project directory.
pub fn venv_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(VENV_DIR)
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Whether `project_dir` has a `.venv` with a runnable interpreter.
pub fn has_interpreter(project_dir: &Path) -> bool {
    let venv = venv_dir(project_dir);
    venv.is_dir() && is_executable(&interpreter_path(&venv))
}
