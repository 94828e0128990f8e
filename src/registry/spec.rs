//! Kernel launch descriptors.
//!
//! [`KernelSpec`] mirrors Jupyter's `kernel.json`. Specs for discovered
//! projects are assembled with [`KernelSpecBuilder`]; installed specs are
//! read from disk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::detection::ProjectRecord;

use super::launch::{LaunchStrategy, BASE_ARGV};

/// How the kernel should be interrupted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterruptMode {
    /// Send SIGINT to the kernel process.
    #[default]
    Signal,
    /// Send an `interrupt_request` message.
    Message,
}

/// Extra kernel capabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelMetadata {
    /// Kernel supports the debug protocol.
    #[serde(default)]
    pub debugger: bool,

    /// Any other metadata keys found in an installed `kernel.json`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Everything needed to launch one kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    #[serde(skip)]
    name: String,

    argv: Vec<String>,

    #[serde(default)]
    env: BTreeMap<String, String>,

    display_name: String,

    #[serde(default)]
    language: String,

    #[serde(default)]
    interrupt_mode: InterruptMode,

    #[serde(default)]
    metadata: KernelMetadata,

    #[serde(skip)]
    resource_dir: Option<PathBuf>,
}

impl KernelSpec {
    /// Start building a spec named `name` from the ipykernel template.
    pub fn builder(name: impl Into<String>) -> KernelSpecBuilder {
        KernelSpecBuilder::new(name)
    }

    /// Spec for a discovered project under the given launch strategy.
    ///
    /// # Example
    ///
    /// ```
    /// use uv_kernels::detection::ProjectRecord;
    /// use uv_kernels::registry::{KernelSpec, LaunchStrategy};
    ///
    /// let record = ProjectRecord::new("/work/team/app/pyproject.toml");
    /// let spec = KernelSpec::for_project(&record, LaunchStrategy::Direct);
    /// assert_eq!(spec.display_name(), "team/app");
    /// assert_eq!(spec.language(), "python");
    /// assert!(spec.metadata().debugger);
    /// ```
    pub fn for_project(record: &ProjectRecord, strategy: LaunchStrategy) -> Self {
        Self::builder(record.kernel_name())
            .display_name(record.display_name())
            .argv(strategy.argv(record))
            .resource_dir(record.directory())
            .build()
    }

    /// Parse an installed `kernel.json`.
    pub fn from_json(name: &str, json: &str) -> serde_json::Result<Self> {
        let mut spec: Self = serde_json::from_str(json)?;
        spec.name = name.to_string();
        Ok(spec)
    }

    /// Kernel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Command vector; contains the `{connection_file}` placeholder.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Extra environment variables for the kernel process.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Human label.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Kernel language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Interrupt mechanism.
    pub fn interrupt_mode(&self) -> InterruptMode {
        self.interrupt_mode
    }

    /// Capability metadata.
    pub fn metadata(&self) -> &KernelMetadata {
        &self.metadata
    }

    /// Directory the spec came from: the kernelspec directory for installed
    /// kernels, the project directory for discovered ones.
    pub fn resource_dir(&self) -> Option<&Path> {
        self.resource_dir.as_deref()
    }

    pub(crate) fn set_resource_dir(&mut self, dir: PathBuf) {
        self.resource_dir = Some(dir);
    }

    /// Serialize as `kernel.json`.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builder for [`KernelSpec`], pre-filled with the ipykernel defaults.
#[derive(Debug, Clone)]
pub struct KernelSpecBuilder {
    spec: KernelSpec,
}

impl KernelSpecBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            spec: KernelSpec {
                name: name.into(),
                argv: BASE_ARGV.iter().map(|s| s.to_string()).collect(),
                env: BTreeMap::new(),
                display_name: "ipykernel".to_string(),
                language: "python".to_string(),
                interrupt_mode: InterruptMode::Signal,
                metadata: KernelMetadata {
                    debugger: true,
                    extra: serde_json::Map::new(),
                },
                resource_dir: None,
            },
        }
    }

    /// Replace the command vector.
    pub fn argv(mut self, argv: Vec<String>) -> Self {
        self.spec.argv = argv;
        self
    }

    /// Set one environment variable.
    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.env.insert(key.into(), value.into());
        self
    }

    /// Set the display name.
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.spec.display_name = display_name.into();
        self
    }

    /// Set the language tag.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.spec.language = language.into();
        self
    }

    /// Set the interrupt mode.
    pub fn interrupt_mode(mut self, mode: InterruptMode) -> Self {
        self.spec.interrupt_mode = mode;
        self
    }

    /// Set the debugger capability flag.
    pub fn debugger(mut self, debugger: bool) -> Self {
        self.spec.metadata.debugger = debugger;
        self
    }

    /// Set the resource directory.
    pub fn resource_dir(mut self, dir: &Path) -> Self {
        self.spec.resource_dir = Some(dir.to_path_buf());
        self
    }

    /// Finish the spec.
    pub fn build(self) -> KernelSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_ipykernel() {
        let spec = KernelSpec::builder("k").build();
        assert_eq!(spec.name(), "k");
        assert_eq!(spec.argv(), BASE_ARGV);
        assert!(spec.env().is_empty());
        assert_eq!(spec.language(), "python");
        assert_eq!(spec.interrupt_mode(), InterruptMode::Signal);
        assert!(spec.metadata().debugger);
    }

    #[test]
    fn builder_overrides() {
        let spec = KernelSpec::builder("k")
            .display_name("Custom")
            .env_var("A", "1")
            .interrupt_mode(InterruptMode::Message)
            .debugger(false)
            .language("python3")
            .build();
        assert_eq!(spec.display_name(), "Custom");
        assert_eq!(spec.env().get("A").map(String::as_str), Some("1"));
        assert_eq!(spec.interrupt_mode(), InterruptMode::Message);
        assert!(!spec.metadata().debugger);
        assert_eq!(spec.language(), "python3");
    }

    #[test]
    fn for_project_uses_record_fields() {
        let record = ProjectRecord::new("/w/team/app/pyproject.toml");
        let spec = KernelSpec::for_project(&record, LaunchStrategy::UvRun);
        assert_eq!(spec.name(), record.kernel_name());
        assert_eq!(spec.display_name(), "team/app");
        assert_eq!(spec.argv()[0], "uv");
        assert_eq!(spec.resource_dir(), Some(Path::new("/w/team/app")));
    }

    #[test]
    fn serializes_as_kernel_json() {
        let spec = KernelSpec::builder("k").display_name("K").build();
        let value: serde_json::Value = serde_json::from_str(&spec.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["display_name"], "K");
        assert_eq!(value["language"], "python");
        assert_eq!(value["interrupt_mode"], "signal");
        assert_eq!(value["metadata"]["debugger"], true);
        assert_eq!(value["argv"][4], "{connection_file}");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn parses_installed_kernel_json() {
        let json = r#"{
            "argv": ["/usr/bin/python3", "-m", "ipykernel_launcher", "-f", "{connection_file}"],
            "display_name": "Python 3 (ipykernel)",
            "language": "python",
            "metadata": {"debugger": true, "vendor": "x"}
        }"#;
        let spec = KernelSpec::from_json("python3", json).unwrap();
        assert_eq!(spec.name(), "python3");
        assert_eq!(spec.display_name(), "Python 3 (ipykernel)");
        assert_eq!(spec.interrupt_mode(), InterruptMode::Signal);
        assert_eq!(spec.metadata().extra.get("vendor"), Some(&serde_json::json!("x")));
    }

    #[test]
    fn parses_minimal_kernel_json() {
        let spec = KernelSpec::from_json("ir", r#"{"argv": ["R"], "display_name": "R"}"#).unwrap();
        assert_eq!(spec.language(), "");
        assert!(!spec.metadata().debugger);
    }

    #[test]
    fn rejects_kernel_json_without_argv() {
        assert!(KernelSpec::from_json("bad", r#"{"display_name": "x"}"#).is_err());
    }
}
