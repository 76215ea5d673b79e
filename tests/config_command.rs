use assert_cmd::Command;
use tempfile::TempDir;

fn setup_test_env() -> (TempDir, String) {
    let temp_dir = tempfile::Builder::new()
        .prefix("trtodo_test")
        .tempdir()
        .expect("Failed to create temporary directory");
    let config_path = temp_dir
        .path()
        .join("config.json")
        .to_str()
        .unwrap()
        .to_string();
    (temp_dir, config_path)
}

fn trtodo(config_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("trusty_todo_lists").unwrap();
    cmd.env("TRTODO_CONFIG", config_path);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_config_get_default() {
    let (_temp_dir, config_path) = setup_test_env();
    let output = stdout_of(trtodo(&config_path).args(["config", "get", "server.bind"]));
    assert_eq!(output.trim(), "127.0.0.1:4567");
}

#[test]
fn test_config_set_then_get() {
    let (_temp_dir, config_path) = setup_test_env();

    let output =
        stdout_of(trtodo(&config_path).args(["config", "set", "session.ttl-minutes", "30"]));
    assert!(output.contains("session.ttl-minutes = 30"));

    let output = stdout_of(trtodo(&config_path).args(["config", "get", "session.ttl-minutes"]));
    assert_eq!(output.trim(), "30");
    assert!(std::path::Path::new(&config_path).exists());
}

#[test]
fn test_config_flag_overrides_env() {
    let (temp_dir, config_path) = setup_test_env();
    let other = temp_dir.path().join("other.json");
    let other = other.to_str().unwrap();

    trtodo(&config_path)
        .args(["--config", other, "config", "set", "server.bind", "0.0.0.0:9000"])
        .assert()
        .success();

    let output = stdout_of(trtodo(&config_path).args(["config", "get", "server.bind"]));
    assert_eq!(output.trim(), "127.0.0.1:4567");
    let output = stdout_of(trtodo(other).args(["config", "get", "server.bind"]));
    assert_eq!(output.trim(), "0.0.0.0:9000");
}

#[test]
fn test_config_list_marks_defaults() {
    let (_temp_dir, config_path) = setup_test_env();
    trtodo(&config_path)
        .args(["config", "set", "session.cookie-name", "sid"])
        .assert()
        .success();

    let output = stdout_of(trtodo(&config_path).args(["config", "list"]));
    assert!(output.contains("session.cookie-name = sid\n"));
    assert!(output.contains("server.bind = 127.0.0.1:4567 (default)"));
    assert!(output.contains("log.filter = info (default)"));
}

#[test]
fn test_config_unset() {
    let (_temp_dir, config_path) = setup_test_env();
    trtodo(&config_path)
        .args(["config", "set", "log.filter", "debug"])
        .assert()
        .success();

    let output = stdout_of(trtodo(&config_path).args(["config", "unset", "log.filter"]));
    assert!(output.contains("log.filter reset to info"));
}

#[test]
fn test_config_rejects_invalid_input() {
    let (_temp_dir, config_path) = setup_test_env();

    let output = trtodo(&config_path)
        .args(["config", "set", "server.bind", "nowhere"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(stderr.contains("Error: Invalid configuration: server.bind must be a socket address"));

    let output = trtodo(&config_path)
        .args(["config", "get", "colour"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output).unwrap().contains("Invalid key: colour"));
    assert!(!std::path::Path::new(&config_path).exists());
}

#[test]
fn test_serve_rejects_bad_bind_flag() {
    let (_temp_dir, config_path) = setup_test_env();
    let output = trtodo(&config_path)
        .args(["serve", "--bind", "not-an-address"])
        .timeout(std::time::Duration::from_secs(5))
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output).unwrap().contains("Invalid bind address"));
}
