#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("instances"))
        .stdout(predicate::str::contains("key-pairs"))
        .stdout(predicate::str::contains("security-groups"))
        .stdout(predicate::str::contains("tags"))
        .stdout(predicate::str::contains("offerings"));
}

/// バージョン表示が正しく動作することを確認（AWSへの接続なし）
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ec2flow"));
}

/// instances run のヘルプ
#[test]
fn test_run_help() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.args(["instances", "run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("--no-wait"))
        .stdout(predicate::str::contains("--wait-timeout"));
}

/// --image なしの run はエラー
#[test]
fn test_run_requires_image() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.args(["instances", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--image"));
}

/// インスタンスID未指定の stop はエラー
#[test]
fn test_stop_requires_ids() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.args(["instances", "stop"]).assert().failure();
}

/// 不正なタグ形式はパース時にエラー
#[test]
fn test_invalid_tag_is_rejected() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.args(["tags", "create", "i-0123", "=value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("タグのキーが空です"));
}

/// 不正なフィルタ形式はパース時にエラー
#[test]
fn test_invalid_filter_is_rejected() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.args(["instances", "list", "--filter", "no-equals"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=VALUE"));
}

/// 壊れた設定ファイルは接続前にエラーになる
#[test]
fn test_broken_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("ec2flow.yaml");
    std::fs::write(&path, "wait: [broken").unwrap();

    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("EC2FLOW_CONFIG")
        .args(["regions"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("設定ファイルの解析に失敗しました"));
}

/// 到達不能なエンドポイントに向けたコマンド（資格情報はダミー、リトライなし）
fn offline_cmd(temp_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("EC2FLOW_CONFIG")
        .env_remove("EC2FLOW_PROFILE")
        .env_remove("AWS_PROFILE")
        .env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "secret")
        .env("AWS_MAX_ATTEMPTS", "1")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env("AWS_CONFIG_FILE", temp_dir.path().join("aws-config"))
        .env("AWS_SHARED_CREDENTIALS_FILE", temp_dir.path().join("aws-credentials"))
        .args(["--region", "us-east-1", "--endpoint-url", "http://127.0.0.1:1"]);
    cmd
}

/// --json 時は進捗メッセージが標準出力に混ざらない
#[test]
fn test_json_keeps_progress_off_stdout() {
    let temp_dir = tempfile::tempdir().unwrap();

    offline_cmd(&temp_dir)
        .args(["--json", "instances", "stop", "i-0123456789abcdef0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("台のインスタンスを停止中"));

    offline_cmd(&temp_dir)
        .args(["--json", "offerings"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("オファリングを取得中"));
}

/// 通常出力では進捗メッセージは標準出力へ
#[test]
fn test_progress_on_stdout_without_json() {
    let temp_dir = tempfile::tempdir().unwrap();

    offline_cmd(&temp_dir)
        .args(["instances", "stop", "i-0123456789abcdef0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("台のインスタンスを停止中"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("ec2flow").unwrap();
    cmd.arg("invalid-command").assert().failure();
}
