//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Default seconds `list` and `show` wait for the scan to finish.
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 30;

/// uv-kernels - Jupyter kernels for every uv project on disk.
#[derive(Debug, Parser)]
#[command(name = "uv-kernels")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides the default config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory to scan for projects (repeatable, replaces configured roots)
    #[arg(
        short,
        long = "root",
        global = true,
        env = "UV_KERNELS_ROOTS",
        value_delimiter = if cfg!(windows) { ';' } else { ':' }
    )]
    pub roots: Vec<PathBuf>,

    /// Launch kernels with the project's .venv interpreter instead of `uv run`
    #[arg(long, global = true, env = "UV_KERNELS_DIRECT")]
    pub direct: bool,

    /// Maximum number of discovered kernels
    #[arg(long, global = true)]
    pub max_kernels: Option<usize>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration overrides carried by the global flags.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            roots: self.roots.clone(),
            direct: self.direct,
            max_kernels: self.max_kernels,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List installed and discovered kernels
    List(ListArgs),

    /// Print the kernel.json for a kernel
    Show(ShowArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Seconds to wait for the scan before listing what was found
    #[arg(long, default_value_t = DEFAULT_SCAN_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            json: false,
            timeout: DEFAULT_SCAN_TIMEOUT_SECS,
        }
    }
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Kernel name
    pub name: String,

    /// Seconds to wait for the scan before giving up on a discovered name
    #[arg(long, default_value_t = DEFAULT_SCAN_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
