//! Kernel launch strategies.
//!
//! A discovered project can be started either by calling its `.venv`
//! interpreter directly or by letting `uv run` pick and sync the environment.

use crate::detection::ProjectRecord;

/// Placeholder Jupyter replaces with the connection file path.
pub const CONNECTION_FILE: &str = "{connection_file}";

/// Command template for an ipykernel, before a strategy is applied.
pub const BASE_ARGV: &[&str] = &["python", "-m", "ipykernel_launcher", "-f", CONNECTION_FILE];

/// Runner invocation prepended by [`LaunchStrategy::UvRun`], followed by the
/// project directory.
pub const UV_RUN_ARGV: &[&str] = &["uv", "run", "--directory"];

/// How a discovered kernel is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    /// Replace `python` with the project's `.venv` interpreter.
    Direct,
    /// Run through `uv run --directory <project>`.
    UvRun,
}

impl LaunchStrategy {
    /// Whether the command goes through an external runner.
    pub fn uses_runner(&self) -> bool {
        matches!(self, Self::UvRun)
    }

    /// Build the kernel command for a project.
    ///
    /// # Example
    ///
    /// ```
    /// use uv_kernels::detection::ProjectRecord;
    /// use uv_kernels::registry::LaunchStrategy;
    ///
    /// let record = ProjectRecord::new("/work/app/pyproject.toml");
    /// let argv = LaunchStrategy::UvRun.argv(&record);
    /// assert_eq!(&argv[..4], ["uv", "run", "--directory", "/work/app"]);
    /// ```
    pub fn argv(&self, record: &ProjectRecord) -> Vec<String> {
        let mut argv: Vec<String> = BASE_ARGV.iter().map(|s| s.to_string()).collect();

        match self {
            Self::Direct => {
                argv[0] = record.interpreter_path().to_string_lossy().into_owned();
                argv
            }
            Self::UvRun => {
                let mut full: Vec<String> = UV_RUN_ARGV.iter().map(|s| s.to_string()).collect();
                full.push(record.directory().to_string_lossy().into_owned());
                full.append(&mut argv);
                full
            }
        }
    }
}

impl std::fmt::Display for LaunchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::UvRun => write!(f, "uv-run"),
        }
    }
}
