//! Integration tests for ops crate

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use gsoc2_config::ExecConfig;
    use gsoc2_errors::{ErrorKind, ProcessError};
    use gsoc2_exec::{CommandOutput, Executor, PreparedCommand, ProcessRunner};
    use gsoc2_ops::*;
    use gsoc2_platform::PlatformResolver;
    use gsoc2_types::OptionValues;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Remembers every argv and answers with canned stdout
    #[derive(Default)]
    struct FakeBinary {
        stdout: String,
        calls: Mutex<Vec<(Vec<String>, bool)>>,
    }

    impl FakeBinary {
        fn printing(stdout: &str) -> Arc<Self> {
            Arc::new(Self {
                stdout: stdout.to_string(),
                ..Self::default()
            })
        }

        fn calls(&self) -> Vec<(Vec<String>, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for FakeBinary {
        async fn run_buffered(
            &self,
            cmd: &PreparedCommand,
        ) -> Result<CommandOutput, ProcessError> {
            self.calls.lock().unwrap().push((cmd.args().to_vec(), false));
            Ok(CommandOutput {
                exit_code: Some(0),
                stdout: self.stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            })
        }

        async fn run_live(
            &self,
            cmd: &PreparedCommand,
            _silent: bool,
        ) -> Result<Option<i32>, ProcessError> {
            self.calls.lock().unwrap().push((cmd.args().to_vec(), true));
            Ok(Some(1))
        }
    }

    fn cli(binary: Arc<FakeBinary>) -> Gsoc2Cli {
        let resolver = PlatformResolver::builder()
            .mock_binary_path("/mock/gsoc2-cli")
            .build();
        Gsoc2Cli::new(None, ExecConfig::default())
            .with_executor(Executor::new(resolver).with_runner(binary))
            .silent(true)
    }

    #[tokio::test]
    async fn test_version_strips_program_name() {
        let binary = FakeBinary::printing("gsoc2-cli 2.21.2\n");
        let version = cli(binary.clone()).version().await.unwrap();
        assert_eq!(version, "2.21.2");
        assert_eq!(binary.calls(), [(vec!["--version".to_string()], false)]);
    }

    #[tokio::test]
    async fn test_binary_path_uses_resolver() {
        let path = cli(FakeBinary::printing("")).binary_path().await.unwrap();
        assert_eq!(path, PathBuf::from("/mock/gsoc2-cli"));
    }

    #[tokio::test]
    async fn test_release_lifecycle_arguments() {
        let binary = FakeBinary::printing("  1.4.0\n");
        let cli = cli(binary.clone());
        let releases = cli.releases();

        releases
            .new_release(
                "1.4.0",
                &ReleaseOptions {
                    projects: vec!["web".into(), "api".into()],
                },
            )
            .await
            .unwrap();
        releases
            .set_commits(
                "1.4.0",
                &SetCommitsOptions {
                    auto: true,
                    ..SetCommitsOptions::default()
                },
            )
            .await
            .unwrap();
        releases.finalize("1.4.0").await.unwrap();
        let proposed = releases.propose_version().await.unwrap();
        releases.list_deploys("1.4.0").await.unwrap();

        assert_eq!(proposed, "1.4.0");
        let argv: Vec<Vec<String>> = binary.calls().into_iter().map(|(args, _)| args).collect();
        assert_eq!(
            argv,
            [
                vec!["releases", "new", "1.4.0", "-p", "web", "-p", "api"],
                vec!["releases", "set-commits", "1.4.0", "--auto"],
                vec!["releases", "finalize", "1.4.0"],
                vec!["releases", "propose-version"],
                vec!["releases", "deploys", "1.4.0", "list"],
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_set_commits_never_runs_binary() {
        let binary = FakeBinary::printing("");
        let err = cli(binary.clone())
            .releases()
            .set_commits("1.0", &SetCommitsOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);
        assert!(binary.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_source_maps_runs_live_per_path() {
        let binary = FakeBinary::printing("");
        let options: UploadSourceMapsOptions = serde_json::from_str(
            r#"{
                "include": ["build", {"paths": ["a", "b"], "rewrite": false}],
                "urlPrefix": "~/static"
            }"#,
        )
        .unwrap();

        // Live runs report success even though the fake exits with 1.
        cli(binary.clone())
            .releases()
            .upload_source_maps("3.0", &options)
            .await
            .unwrap();

        let mut calls = binary.calls();
        calls.sort();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, live)| *live));
        assert_eq!(
            calls[0].0,
            [
                "sourcemaps", "upload", "--release", "3.0", "a", "--ignore", "node_modules",
                "--no-rewrite", "--url-prefix", "~/static",
            ]
        );
        assert_eq!(
            calls[2].0,
            [
                "sourcemaps", "upload", "--release", "3.0", "build", "--ignore", "node_modules",
                "--url-prefix", "~/static",
            ]
        );
    }

    #[tokio::test]
    async fn test_new_deploy() {
        let binary = FakeBinary::printing("");
        let cli = cli(binary.clone());

        let err = cli
            .releases()
            .new_deploy("1.0", &OptionValues::new().with("name", "blue"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);

        cli.releases()
            .new_deploy(
                "1.0",
                &OptionValues::new()
                    .with("time", 12)
                    .with("env", "production")
                    .with("name", "blue"),
            )
            .await
            .unwrap();
        assert_eq!(
            binary.calls()[0].0,
            [
                "releases", "deploys", "1.0", "new", "--env", "production", "--time", "12",
                "--name", "blue",
            ]
        );
    }

    #[tokio::test]
    async fn test_mistyped_source_map_option_is_a_schema_error() {
        let binary = FakeBinary::printing("");
        let options = UploadSourceMapsOptions::new(["dist"]).with_option("rewrite", "yes");
        let err = cli(binary.clone())
            .releases()
            .upload_source_maps("1.0", &options)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaValidation);
        assert_eq!(err.to_string(), "schema error: rewrite should be a bool");
        assert!(binary.calls().is_empty());
    }
}
