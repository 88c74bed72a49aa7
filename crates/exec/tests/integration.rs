//! Integration tests for process execution against a real child

#[cfg(all(test, unix))]
mod tests {
    use gsoc2_config::ExecConfig;
    use gsoc2_errors::{Error, ErrorKind};
    use gsoc2_exec::*;
    use gsoc2_platform::PlatformResolver;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn executor_for(script: PathBuf) -> Executor {
        Executor::new(PlatformResolver::builder().mock_binary_path(script).build())
    }

    // Kept as a single test so no other test thread forks while a script is
    // still open for writing.
    #[tokio::test]
    async fn test_real_process_modes() {
        let temp = TempDir::new().unwrap();
        let config = ExecConfig {
            org: Some("acme".into()),
            ..ExecConfig::default()
        };

        let failing = executor_for(write_script(
            temp.path(),
            "fail.sh",
            "echo 'exploded' >&2\nexit 2",
        ));
        let err = failing
            .execute(&ExecutionRequest::buffered(["releases"]), None, &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProcessFailure);
        match &err {
            Error::Process(process) => {
                assert_eq!(process.exit_code(), Some(2));
                assert!(process.to_string().contains("exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let output = failing
            .execute(&ExecutionRequest::live(["releases"], true), None, &config)
            .await
            .unwrap();
        assert_eq!(output, ExecOutput::Streamed);

        let echo = executor_for(write_script(
            temp.path(),
            "echo.sh",
            "printf '%s|%s\\n\\n' \"$GSOC2_ORG\" \"$*\"",
        ));
        let output = echo
            .execute(
                &ExecutionRequest::buffered(["releases", "new", "v1"]),
                None,
                &config,
            )
            .await
            .unwrap();
        assert_eq!(output.captured(), Some("acme|releases new v1\n\n"));

        let missing = executor_for(temp.path().join("does-not-exist"));
        let err = missing
            .execute(&ExecutionRequest::live(["x"], true), None, &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProcessFailure);
    }
}
