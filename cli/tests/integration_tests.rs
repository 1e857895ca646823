use std::fs;
use std::path::PathBuf;
use std::process::Output;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("cli_recover_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_cli-recover"))
        .args(args)
        .output()
        .expect("failed to run cli-recover")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_version_prints_package_version() {
    let output = run(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_suggest_missing_required_parameters() {
    let output = run(&[
        "suggest",
        "--error-message",
        "the following arguments are required: --name/-n/--resource-group/-g",
        "--no-color",
        "--",
        "group",
        "create",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("TRY"), "missing TRY header in: {text}");
    assert!(text.contains("az group create"));
    assert!(text.contains("--name"));
    assert!(text.contains("--location"));
}

#[test]
fn test_suggest_unclassifiable_input_prints_nothing() {
    let output = run(&[
        "suggest",
        "--error-message",
        "some novel failure nobody has seen",
        "--no-color",
        "--",
        "zz",
        "zz",
    ]);

    // The helper never surfaces a failure of its own.
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_suggest_with_data_dir_override() {
    let dir = TempDir::new("data_dir_override");

    fs::write(
        dir.join("help_table.json"),
        r#"{
            "vm restart": {
                "short-summary": "Restart VMs.",
                "parameters": {
                    "--name": {"name": ["--name", "-n"], "required": true,
                               "short-summary": "The VM name."}
                }
            }
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("toc.json"),
        r#"{"items": [{"displayName": "az vm restart", "href": "/cli/azure/vm"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("model.json"),
        r#"{
            "MissingRequiredParameters": {
                "vm restart": [
                    {"command": "vm restart", "parameters": "--name", "placeholders": "MyVm"}
                ]
            }
        }"#,
    )
    .unwrap();

    let output = run(&[
        "suggest",
        "--error-message",
        "the following arguments are required: --name",
        "--no-color",
        "--data-dir",
        dir.path.to_str().unwrap(),
        "--",
        "vm",
        "restart",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("az vm restart --name MyVm"), "unexpected output: {text}");
    assert!(text.contains("Restart VMs."));
    assert!(text.contains("https://docs.microsoft.com/en-us/cli/azure/vm"));
    assert!(text.contains("Read more about az vm restart"));
}

#[test]
fn test_suggest_missing_data_dir_degrades_quietly() {
    let output = run(&[
        "suggest",
        "--error-message",
        "the following arguments are required: --name",
        "--no-color",
        "--data-dir",
        "/nonexistent/data/dir",
        "--",
        "group",
        "create",
    ]);

    // Missing static files downgrade to no suggestions, not to an error.
    assert!(output.status.success());
}

#[test]
fn test_suggest_unreachable_remote_falls_back_to_local_table() {
    let output = run(&[
        "suggest",
        "--error-message",
        "the following arguments are required: --name/-n/--resource-group/-g",
        "--no-color",
        "--remote",
        "http://127.0.0.1:9/suggestions",
        "--",
        "group",
        "create",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("az group create"), "local fallback missing: {text}");
}
