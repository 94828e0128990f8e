//! Integration tests for the uv-kernels binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Isolated home, config and data directories plus a scan root.
struct Sandbox {
    home: TempDir,
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            root: TempDir::new().unwrap(),
        }
    }

    fn command(&self) -> Command {
        let home = self.home.path();
        let mut cmd = Command::new(cargo_bin("uv-kernels"));
        cmd.env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env("XDG_DATA_HOME", home.join("data"))
            .env("JUPYTER_PATH", home.join("jupyter"))
            .env_remove("UV_KERNELS_ROOTS")
            .env_remove("UV_KERNELS_DIRECT")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.root.path())
            .arg("--no-color");
        cmd
    }

    fn install_kernel(&self, name: &str) {
        let dir = self.home.path().join("jupyter").join("kernels").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("kernel.json"),
            r#"{"argv": ["python3", "-m", "ipykernel_launcher", "-f", "{connection_file}"], "display_name": "Python 3", "language": "python"}"#,
        )
        .unwrap();
    }

    fn project(&self, relative: &str, deps: &str) -> std::path::PathBuf {
        let dir = self.root.path().join(relative);
        make_project(&dir, deps);
        dir
    }
}

fn make_project(dir: &Path, deps: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("pyproject.toml"),
        format!("[project]\nname = \"p\"\ndependencies = [{}]\n", deps),
    )
    .unwrap();
    let bin = if cfg!(windows) { "Scripts" } else { "bin" };
    let exe = if cfg!(windows) { "python.exe" } else { "python" };
    let python = dir.join(".venv").join(bin).join(exe);
    fs::create_dir_all(python.parent().unwrap()).unwrap();
    fs::write(&python, "").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("uv-kernels"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Jupyter kernels"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("uv-kernels"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("uv-kernels"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn list_shows_discovered_and_installed() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.project("team/app", "\"ipykernel>=6\"");
    sandbox.project("team/plain", "\"numpy\"");
    sandbox.install_kernel("python3");

    let mut cmd = sandbox.command();
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("python3"))
        .stdout(predicate::str::contains("uv_kernel_"))
        .stdout(predicate::str::contains("team/app"))
        .stdout(predicate::str::contains("team/plain").not());
    Ok(())
}

#[test]
fn list_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.project("app", "\"ipykernel\"");

    let mut cmd = sandbox.command();
    cmd.args(["list", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["complete"], true);
    let discovered: Vec<_> = value["kernels"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|k| k["discovered"] == true)
        .collect();
    assert_eq!(discovered.len(), 1);
    Ok(())
}

#[test]
fn list_respects_max_kernels() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    for name in ["a", "b", "c"] {
        sandbox.project(name, "\"ipykernel\"");
    }

    let mut cmd = sandbox.command();
    cmd.args(["list", "--json", "--max-kernels", "1"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let value: serde_json::Value = serde_json::from_slice(&output)?;
    let discovered = value["kernels"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|k| k["discovered"] == true)
        .count();
    assert_eq!(discovered, 1);
    Ok(())
}

#[test]
fn show_discovered_kernel_uses_uv_run() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let dir = sandbox.project("app", "\"ipykernel\"");

    let mut list = sandbox.command();
    list.args(["list", "--json"]);
    let output = list.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output)?;
    let name = value["kernels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["discovered"] == true)
        .and_then(|k| k["name"].as_str())
        .unwrap()
        .to_string();

    let mut cmd = sandbox.command();
    cmd.args(["show", &name]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"uv\""))
        .stdout(predicate::str::contains("--directory"))
        .stdout(predicate::str::contains(dir.to_string_lossy().as_ref()));
    Ok(())
}

#[test]
fn show_direct_flag_uses_interpreter() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.project("app", "\"ipykernel\"");

    let mut list = sandbox.command();
    list.args(["list", "--json"]);
    let output = list.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output)?;
    let name = value["kernels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["discovered"] == true)
        .and_then(|k| k["name"].as_str())
        .unwrap()
        .to_string();

    let mut cmd = sandbox.command();
    cmd.args(["show", &name, "--direct"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".venv"))
        .stdout(predicate::str::contains("--directory").not());
    Ok(())
}

#[test]
fn show_installed_kernel() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.install_kernel("python3");

    let mut cmd = sandbox.command();
    cmd.args(["show", "python3"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Python 3"));
    Ok(())
}

#[test]
fn show_unknown_kernel_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();

    let mut cmd = sandbox.command();
    cmd.args(["show", "uv_kernel_nowhere"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("uv_kernel_nowhere"));

    let mut cmd = sandbox.command();
    cmd.args(["show", "no-such-kernel"]);
    cmd.assert().code(2);
    Ok(())
}

#[test]
fn config_reads_file() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let config = sandbox.home.path().join("custom.yml");
    fs::write(&config, "max_kernels: 7\nuse_uv_run: false\n")?;

    let mut cmd = sandbox.command();
    cmd.arg("--config").arg(&config).args(["config", "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"max_kernels\": 7"))
        .stdout(predicate::str::contains("\"use_uv_run\": false"));
    Ok(())
}

#[test]
fn config_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();

    let mut cmd = sandbox.command();
    cmd.arg("--config")
        .arg(sandbox.home.path().join("missing.yml"))
        .arg("config");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("missing.yml"));
    Ok(())
}

#[test]
fn config_invalid_yaml_fails() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let config = sandbox.home.path().join("bad.yml");
    fs::write(&config, "roots: [unclosed")?;

    let mut cmd = sandbox.command();
    cmd.arg("--config").arg(&config).arg("config");
    cmd.assert().code(1);
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("uv-kernels"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("uv-kernels"));
    Ok(())
}

#[test]
fn list_accepts_largest_timeout() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.project("app", "\"ipykernel\"");

    let mut cmd = sandbox.command();
    cmd.args(["list", "--json", "--timeout", &u64::MAX.to_string()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"complete\": true"));
    Ok(())
}
