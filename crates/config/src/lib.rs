#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration for invocations of the native binary
//!
//! This crate handles:
//! - The recognized configuration fields and the environment variables
//!   they map to
//! - Loading those fields from a TOML file
//! - Turning a header mapping into `--header` argument pairs

pub mod constants;

pub use constants::*;

use gsoc2_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Per-invocation configuration translated into the child environment
///
/// Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    pub url: Option<String>,
    pub auth_token: Option<String>,
    pub api_key: Option<String>,
    pub dsn: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
    pub vcs_remote: Option<String>,
    /// Raw `Key:Value` header; takes precedence over `headers`
    pub custom_header: Option<String>,
    /// Extra request headers, passed as `--header key:value` in this order
    ///
    /// In TOML either a `[headers]` table of `Name = "value"` pairs or a
    /// `[[headers]]` list of `name`/`value` entries.
    #[serde(deserialize_with = "header_table::deserialize")]
    pub headers: Vec<Header>,
}

/// A single request header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse `KEY:VALUE`, splitting at the first colon
    ///
    /// # Errors
    ///
    /// Returns an error if there is no colon or the key is empty.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(Self::new(name.trim(), value.trim_start()))
            }
            _ => Err(ConfigError::InvalidValue {
                field: "header".to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

impl std::str::FromStr for Header {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

mod header_table {
    use super::Header;
    use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct HeadersVisitor;

    impl<'de> Visitor<'de> for HeadersVisitor {
        type Value = Vec<Header>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of header values or a list of name/value entries")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut headers = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(header) = seq.next_element::<Header>()? {
                headers.push(header);
            }
            Ok(headers)
        }

        // Entries come back in the order the deserializer yields them
        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut headers = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, value)) = map.next_entry::<String, String>()? {
                headers.push(Header { name, value });
            }
            Ok(headers)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Header>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(HeadersVisitor)
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl ExecConfig {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("gsoc2").join("bridge.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.display().to_string(),
                    error: e.to_string(),
                }
            }
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded bridge config");
        Ok(config)
    }

    /// Load from an explicit path, or from the default path when it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = path {
            return Self::load_from_file(path).await;
        }
        let default_path = Self::default_path()?;
        if fs::try_exists(&default_path).await.unwrap_or(false) {
            Self::load_from_file(&default_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay the fields set in `other` on top of `self`
    pub fn merge(&mut self, other: &ExecConfig) {
        fn take(slot: &mut Option<String>, value: Option<&String>) {
            if let Some(value) = non_empty(value) {
                *slot = Some(value.to_string());
            }
        }
        take(&mut self.url, other.url.as_ref());
        take(&mut self.auth_token, other.auth_token.as_ref());
        take(&mut self.api_key, other.api_key.as_ref());
        take(&mut self.dsn, other.dsn.as_ref());
        take(&mut self.org, other.org.as_ref());
        take(&mut self.project, other.project.as_ref());
        take(&mut self.vcs_remote, other.vcs_remote.as_ref());
        take(&mut self.custom_header, other.custom_header.as_ref());
        if !other.headers.is_empty() {
            self.headers.clone_from(&other.headers);
        }
    }

    /// Environment variables to set on top of the inherited environment
    ///
    /// Only set fields produce an entry. `CUSTOM_HEADER` appears only when
    /// `custom_header` is set; a bare `headers` list goes through
    /// [`ExecConfig::header_args`] instead.
    #[must_use]
    pub fn env_overlay(&self, config_file: Option<&Path>) -> Vec<(&'static str, OsString)> {
        let mut env = Vec::new();
        if let Some(path) = config_file.filter(|p| !p.as_os_str().is_empty()) {
            env.push((PROPERTIES_ENV, path.as_os_str().to_os_string()));
        }

        let fields = [
            (URL_ENV, self.url.as_ref()),
            (AUTH_TOKEN_ENV, self.auth_token.as_ref()),
            (API_KEY_ENV, self.api_key.as_ref()),
            (DSN_ENV, self.dsn.as_ref()),
            (ORG_ENV, self.org.as_ref()),
            (PROJECT_ENV, self.project.as_ref()),
            (VCS_REMOTE_ENV, self.vcs_remote.as_ref()),
            (CUSTOM_HEADER_ENV, self.custom_header.as_ref()),
        ];
        for (name, value) in fields {
            if let Some(value) = non_empty(value) {
                env.push((name, OsString::from(value)));
            }
        }
        env
    }

    /// `--header key:value` pairs to prepend to the argument list
    ///
    /// Empty when `custom_header` is set, since that field wins.
    #[must_use]
    pub fn header_args(&self) -> Vec<String> {
        if non_empty(self.custom_header.as_ref()).is_some() {
            return Vec::new();
        }
        self.headers
            .iter()
            .flat_map(|header| [HEADER_FLAG.to_string(), header.to_string()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overlay_only_contains_set_fields() {
        let config = ExecConfig {
            url: Some("https://x".into()),
            auth_token: Some("t".into()),
            org: Some(String::new()),
            ..ExecConfig::default()
        };

        let env = config.env_overlay(None);
        assert_eq!(
            env,
            vec![
                (URL_ENV, OsString::from("https://x")),
                (AUTH_TOKEN_ENV, OsString::from("t")),
            ]
        );
    }

    #[test]
    fn test_config_file_sets_properties_env() {
        let env = ExecConfig::default().env_overlay(Some(Path::new("/etc/gsoc2.properties")));
        assert_eq!(
            env,
            vec![(PROPERTIES_ENV, OsString::from("/etc/gsoc2.properties"))]
        );
    }

    #[test]
    fn test_header_args_preserve_order() {
        let config = ExecConfig {
            headers: vec![Header::new("X-B", "2"), Header::new("X-A", "1")],
            ..ExecConfig::default()
        };
        assert_eq!(
            config.header_args(),
            ["--header", "X-B:2", "--header", "X-A:1"]
        );
        assert!(config.env_overlay(None).is_empty());
    }

    #[test]
    fn test_custom_header_wins_over_headers() {
        let config = ExecConfig {
            custom_header: Some("X-Custom:yes".into()),
            headers: vec![Header::new("X-A", "1")],
            ..ExecConfig::default()
        };
        assert!(config.header_args().is_empty());
        assert_eq!(
            config.env_overlay(None),
            vec![(CUSTOM_HEADER_ENV, OsString::from("X-Custom:yes"))]
        );
    }

    #[test]
    fn test_header_parse() {
        let header = Header::parse("X-Trace: a:b").unwrap();
        assert_eq!(header, Header::new("X-Trace", "a:b"));
        assert!(Header::parse("no-colon").is_err());
        assert!(Header::parse(":value").is_err());
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut base = ExecConfig {
            url: Some("https://file".into()),
            org: Some("file-org".into()),
            ..ExecConfig::default()
        };
        let flags = ExecConfig {
            org: Some("flag-org".into()),
            project: Some(String::new()),
            ..ExecConfig::default()
        };
        base.merge(&flags);
        assert_eq!(base.url.as_deref(), Some("https://file"));
        assert_eq!(base.org.as_deref(), Some("flag-org"));
        assert_eq!(base.project, None);
    }
}
