//! Integration tests for the scanner and project qualification.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;
use uv_kernels::detection::{ProjectQualifier, ProjectRecord, PYPROJECT_FILE};
use uv_kernels::scanner::{DirectoryScanner, ScanOptions, ScanState};

const WAIT: Duration = Duration::from_secs(30);

fn write_pyproject(dir: &Path, deps: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(PYPROJECT_FILE),
        format!("[project]\nname = \"p\"\ndependencies = [{}]\n", deps),
    )
    .unwrap();
}

fn make_venv(dir: &Path, executable: bool) {
    let python = ProjectRecord::new(dir.join(PYPROJECT_FILE)).interpreter_path();
    fs::create_dir_all(python.parent().unwrap()).unwrap();
    fs::write(&python, "").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if executable { 0o755 } else { 0o644 };
        fs::set_permissions(&python, fs::Permissions::from_mode(mode)).unwrap();
    }
    #[cfg(not(unix))]
    let _ = executable;
}

fn make_project(dir: &Path, deps: &str) {
    write_pyproject(dir, deps);
    make_venv(dir, true);
}

fn scan(root: &Path) -> Vec<ProjectRecord> {
    let mut scanner = DirectoryScanner::new(ScanOptions::new(vec![root.to_path_buf()]));
    scanner.start();
    assert!(scanner.wait(WAIT));
    scanner.drain().to_vec()
}

fn directories(records: &[ProjectRecord]) -> HashSet<String> {
    records
        .iter()
        .map(|r| r.directory().file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn near_miss_dependencies_do_not_qualify() {
    let temp = TempDir::new().unwrap();
    let qualifier = ProjectQualifier::new();
    for (i, dep) in ["ipykernel_launcher", "ipykernel-extras", "my-ipykernel", "notipykernel"]
        .iter()
        .enumerate()
    {
        let dir = temp.path().join(format!("p{}", i));
        make_project(&dir, &format!("\"{}\"", dep));
        assert!(!qualifier.qualifies(&dir.join(PYPROJECT_FILE)), "{}", dep);
    }
}

#[test]
fn declared_dependency_needs_executable_interpreter() {
    let temp = TempDir::new().unwrap();
    let qualifier = ProjectQualifier::new();

    let missing = temp.path().join("missing");
    write_pyproject(&missing, "\"ipykernel\"");
    assert!(!qualifier.qualifies(&missing.join(PYPROJECT_FILE)));

    let ok = temp.path().join("ok");
    make_project(&ok, "\"ipykernel\"");
    assert!(qualifier.qualifies(&ok.join(PYPROJECT_FILE)));
}

#[cfg(unix)]
#[test]
fn non_executable_interpreter_does_not_qualify() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("noexec");
    write_pyproject(&dir, "\"ipykernel\"");
    make_venv(&dir, false);
    assert!(!ProjectQualifier::new().qualifies(&dir.join(PYPROJECT_FILE)));
}

#[test]
fn malformed_pyproject_is_skipped() {
    let temp = TempDir::new().unwrap();
    let bad = temp.path().join("bad");
    fs::create_dir_all(&bad).unwrap();
    fs::write(bad.join(PYPROJECT_FILE), "[project\ndependencies = ").unwrap();
    make_venv(&bad, true);
    make_project(&temp.path().join("good"), "\"ipykernel\"");

    let records = scan(temp.path());
    assert_eq!(directories(&records), HashSet::from(["good".to_string()]));
}

#[test]
fn excluded_directories_are_not_descended() {
    let temp = TempDir::new().unwrap();
    make_project(&temp.path().join("node_modules").join("pkg"), "\"ipykernel\"");
    make_project(&temp.path().join(".hidden").join("pkg"), "\"ipykernel\"");
    make_project(&temp.path().join("site-packages").join("pkg"), "\"ipykernel\"");
    make_project(&temp.path().join("visible"), "\"ipykernel\"");

    let records = scan(temp.path());
    assert_eq!(directories(&records), HashSet::from(["visible".to_string()]));
}

#[test]
fn configured_ignores_are_not_descended() {
    let temp = TempDir::new().unwrap();
    make_project(&temp.path().join("archive").join("old"), "\"ipykernel\"");
    make_project(&temp.path().join("new"), "\"ipykernel\"");

    let options = ScanOptions::new(vec![temp.path().to_path_buf()]).with_ignored(["archive"]);
    let mut scanner = DirectoryScanner::new(options);
    scanner.start();
    assert!(scanner.wait(WAIT));
    assert_eq!(directories(scanner.drain()), HashSet::from(["new".to_string()]));
}

#[test]
fn overlapping_roots_yield_one_record() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("nested").join("app");
    make_project(&project, "\"ipykernel\"");

    let options = ScanOptions::new(vec![
        temp.path().to_path_buf(),
        temp.path().join("nested"),
    ]);
    let mut scanner = DirectoryScanner::new(options);
    scanner.start();
    assert!(scanner.wait(WAIT));
    assert_eq!(scanner.drain().len(), 1);
}

#[test]
fn drain_is_stable_after_completion() {
    let temp = TempDir::new().unwrap();
    make_project(&temp.path().join("a"), "\"ipykernel\"");
    make_project(&temp.path().join("b"), "\"ipykernel\"");

    let mut scanner = DirectoryScanner::new(ScanOptions::new(vec![temp.path().to_path_buf()]));
    scanner.start();
    assert!(scanner.wait(WAIT));
    assert_eq!(scanner.state(), ScanState::Complete);

    let first: HashSet<String> = scanner.drain().iter().map(|r| r.kernel_name()).collect();
    let second: HashSet<String> = scanner.drain().iter().map(|r| r.kernel_name()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn missing_roots_complete_empty() {
    let temp = TempDir::new().unwrap();
    let records = scan(&temp.path().join("does-not-exist"));
    assert!(records.is_empty());
}

#[test]
fn kernel_names_are_deterministic_and_distinct() {
    let a = ProjectRecord::new("/home/u/work/a_b/c/pyproject.toml");
    let b = ProjectRecord::new("/home/u/work/a/b_c/pyproject.toml");
    let a_again = ProjectRecord::new("/home/u/work/a_b/c/pyproject.toml");

    assert_eq!(a.kernel_name(), a_again.kernel_name());
    assert_ne!(a.kernel_name(), b.kernel_name());
}
