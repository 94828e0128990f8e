//! Kernel project detection.
//!
//! - [`pyproject`] decides whether a `pyproject.toml` belongs to a kernel project
//! - [`environment`] locates the `.venv` interpreter
//! - [`project`] derives names and paths for a discovered project

pub mod environment;
pub mod project;
pub mod pyproject;

pub use environment::{has_interpreter, interpreter_path, is_executable, venv_dir, VENV_DIR};
pub use project::{is_discovered_name, ProjectRecord, KERNEL_PREFIX};
pub use pyproject::{
    normalize_name, parse_dependencies, read_dependencies, requirement_name, ProjectQualifier,
    DEPENDENCIES_KEY, KERNEL_PACKAGE, PYPROJECT_FILE,
};
