//! Shared helpers for CLI contract tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with XDG directories redirected into `temp_dir`, restoring the
/// previous environment afterwards. Serialized so parallel tests cannot
/// observe each other's environment.
pub fn with_xdg_env<F: FnOnce()>(temp_dir: &TempDir, f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let old_config = std::env::var_os("XDG_CONFIG_HOME");
    let old_state = std::env::var_os("XDG_STATE_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().join("config"));
    std::env::set_var("XDG_STATE_HOME", temp_dir.path().join("state"));

    f();

    match old_config {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    match old_state {
        Some(value) => std::env::set_var("XDG_STATE_HOME", value),
        None => std::env::remove_var("XDG_STATE_HOME"),
    }
}

pub const FIXTURE_PAYLOAD: &str = r##"{
  "fileSystem": [
    {"path": "src/main/java/com/example/App.java", "content": "public class App {}"},
    {"path": "src/main/resources/application.yml", "content": "server:\n  port: 8080"},
    {"path": "build.gradle.kts", "content": "plugins { java }"}
  ],
  "guideMd": "# Development Guide\n\nKeep controllers thin."
}"##;

/// Create a workspace directory holding the fixture result.
pub fn workspace_with_result(temp_dir: &TempDir) -> PathBuf {
    let workspace_root = temp_dir.path().join("workspace");
    let state_dir = workspace_root.join(".blueprint");
    std::fs::create_dir_all(&state_dir).unwrap();
    std::fs::write(state_dir.join("result.json"), FIXTURE_PAYLOAD).unwrap();
    workspace_root
}

/// Create an empty workspace directory.
pub fn empty_workspace(temp_dir: &TempDir) -> PathBuf {
    let workspace_root = temp_dir.path().join("workspace");
    std::fs::create_dir_all(&workspace_root).unwrap();
    workspace_root
}

/// Write a provider profile into the redirected XDG config directory.
/// Must run inside `with_xdg_env`.
pub fn create_test_provider(name: &str) {
    let config_home = PathBuf::from(std::env::var_os("XDG_CONFIG_HOME").unwrap());
    let providers_dir = config_home.join("blueprint").join("providers");
    std::fs::create_dir_all(&providers_dir).unwrap();
    std::fs::write(
        providers_dir.join(format!("{}.toml", name)),
        format!(
            "provider_name = \"{}\"\nprovider_type = \"ollama\"\nmodel = \"llama3\"\n",
            name
        ),
    )
    .unwrap();
}

/// Assert a path exists with the given content.
pub fn assert_file_content(path: &Path, expected: &str) {
    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content, expected);
}
