//! Integration tests for binary resolution

#[cfg(test)]
mod tests {
    use gsoc2_config::BINARY_PATH_ENV;
    use gsoc2_platform::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_env_override_is_read_on_every_call() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        let temp = TempDir::new().unwrap();
        let mut resolver = PlatformResolver::builder()
            .host(HostPlatform::new(HostOs::Linux, HostArch::X64))
            .install_root(temp.path())
            .build();
        resolver.set_mock_binary_path("/mock/gsoc2-cli");

        std::env::set_var(BINARY_PATH_ENV, "/from/env/gsoc2-cli");
        assert_eq!(
            resolver.resolve_path().await.unwrap(),
            PathBuf::from("/from/env/gsoc2-cli")
        );

        std::env::remove_var(BINARY_PATH_ENV);
        assert_eq!(
            resolver.resolve_path().await.unwrap(),
            PathBuf::from("/mock/gsoc2-cli")
        );
    }

    #[tokio::test]
    async fn test_empty_env_override_is_ignored() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("gsoc2-cli"), b"").unwrap();
        let resolver = PlatformResolver::builder()
            .host(HostPlatform::new(HostOs::Linux, HostArch::Arm64))
            .install_root(temp.path())
            .build();

        std::env::set_var(BINARY_PATH_ENV, "");
        let path = resolver.resolve_path().await.unwrap();
        std::env::remove_var(BINARY_PATH_ENV);

        assert_eq!(path, temp.path().join("gsoc2-cli"));
    }

    #[tokio::test]
    async fn test_companion_package_found_through_node_modules() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var(BINARY_PATH_ENV);

        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let install_root = project.join("node_modules").join("@gsoc2").join("cli");
        let binary = project
            .join("node_modules")
            .join("@gsoc2")
            .join("cli-win32-x64")
            .join("bin")
            .join("gsoc2-cli.exe");
        std::fs::create_dir_all(&install_root).unwrap();
        std::fs::create_dir_all(binary.parent().unwrap()).unwrap();
        std::fs::write(&binary, b"").unwrap();

        let resolver = PlatformResolver::builder()
            .host(HostPlatform::new(HostOs::Win32, HostArch::X64))
            .install_root(&install_root)
            .build();

        assert_eq!(resolver.resolve_path().await.unwrap(), binary);
    }
}
