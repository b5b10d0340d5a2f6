use risk_recon::executor::{Executor, UNKNOWN_ERROR};
use risk_recon::CommandError;

fn sh() -> Executor {
    Executor::with_shell("/bin/sh")
}

#[tokio::test]
async fn zero_exit_captures_stdout() {
    let out = sh().execute("echo hello").await.expect("echo ok");
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn stderr_is_merged_into_output() {
    let out = sh()
        .execute("echo out; echo err 1>&2")
        .await
        .expect("exit 0");
    assert!(out.contains("out\n"));
    assert!(out.contains("err\n"));
}

#[tokio::test]
async fn non_zero_exit_carries_output() {
    let err = sh().execute("echo nope; exit 3").await.unwrap_err();
    assert_eq!(err, CommandError::ExecutionFailed("nope\n".into()));
}

#[tokio::test]
async fn silent_non_zero_exit_uses_placeholder() {
    let err = sh().execute("exit 7").await.unwrap_err();
    assert_eq!(err, CommandError::ExecutionFailed(UNKNOWN_ERROR.into()));
}

#[tokio::test]
async fn missing_shell_is_a_spawn_failure() {
    let exec = Executor::with_shell("/definitely/not/a/shell");
    let err = exec.execute("echo hi").await.unwrap_err();
    assert!(matches!(err, CommandError::SpawnFailed(_)));
    assert!(err.is_execution_failure());
}

#[tokio::test]
async fn blank_command_is_rejected() {
    assert_eq!(sh().execute("  \t ").await, Err(CommandError::EmptyCommand));
}

#[tokio::test]
async fn working_directory_is_applied() {
    let dir = tempfile::tempdir().expect("tempdir");
    let exec = sh().with_workdir(Some(dir.path().to_path_buf()));
    exec.execute("echo data > marker.txt").await.expect("write ok");
    assert!(dir.path().join("marker.txt").exists());
}

#[tokio::test]
async fn command_is_trimmed_before_running() {
    let out = sh().execute("   echo trimmed   \n").await.expect("ok");
    assert_eq!(out, "trimmed\n");
}
