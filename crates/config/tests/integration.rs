//! Integration tests for config

#[cfg(test)]
mod tests {
    use gsoc2_config::*;
    use gsoc2_errors::{ConfigError, Error};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
url = "https://gsoc2.example.com/"
auth_token = "secret"
org = "acme"
project = "web"

[[headers]]
name = "X-First"
value = "1"

[[headers]]
name = "X-Second"
value = "2"
        "#
        )
        .unwrap();

        let config = ExecConfig::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.url.as_deref(), Some("https://gsoc2.example.com/"));
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.api_key, None);
        assert_eq!(
            config.header_args(),
            ["--header", "X-First:1", "--header", "X-Second:2"]
        );
    }

    #[tokio::test]
    async fn test_load_headers_from_table() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
org = "acme"

[headers]
X-A = "1"
X-B = "two: parts"
        "#
        )
        .unwrap();

        let config = ExecConfig::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(
            config.headers,
            [Header::new("X-A", "1"), Header::new("X-B", "two: parts")]
        );
        assert_eq!(
            config.header_args(),
            ["--header", "X-A:1", "--header", "X-B:two: parts"]
        );
    }

    #[tokio::test]
    async fn test_header_with_non_string_value_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[headers]\nX-A = 1").unwrap();

        let result = ExecConfig::load_from_file(temp_file.path()).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExecConfig::load_from_file(&dir.path().join("absent.toml")).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "url = [").unwrap();

        let result = ExecConfig::load_from_file(temp_file.path()).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError { .. }))
        ));
    }
}
