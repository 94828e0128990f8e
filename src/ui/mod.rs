//! Terminal user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal output
//! - [`MockUI`] for tests
//! - Spinners and the color theme
//!
//! Results (kernel names, JSON) go through [`UserInterface::output`] and are
//! always printed. Status lines respect the [`OutputMode`].
//!
//! # Example
//!
//! ```
//! use uv_kernels::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.output("python3");
//! ui.warning("Scan still running");
//! assert_eq!(ui.outputs(), ["python3"]);
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, KernelTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// The theme used to style output.
    fn theme(&self) -> &KernelTheme;

    /// Print command results. Never suppressed.
    fn output(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Finish with a warning.
    fn finish_warning(&mut self, msg: &str);

    /// Remove the spinner without a final line.
    fn clear(&mut self);
}
