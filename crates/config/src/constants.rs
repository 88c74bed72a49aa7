//! Environment variable names understood by the native binary
//!
//! These are part of the contract with `gsoc2-cli` and are not configurable.

/// Overrides binary resolution entirely when set.
pub const BINARY_PATH_ENV: &str = "GSOC2_BINARY_PATH";

/// Path of the properties/config file handed to the binary.
pub const PROPERTIES_ENV: &str = "GSOC2_PROPERTIES";

pub const URL_ENV: &str = "GSOC2_URL";
pub const AUTH_TOKEN_ENV: &str = "GSOC2_AUTH_TOKEN";
pub const API_KEY_ENV: &str = "GSOC2_API_KEY";
pub const DSN_ENV: &str = "GSOC2_DSN";
pub const ORG_ENV: &str = "GSOC2_ORG";
pub const PROJECT_ENV: &str = "GSOC2_PROJECT";
pub const VCS_REMOTE_ENV: &str = "GSOC2_VCS_REMOTE";

/// Single raw `Key:Value` header string.
pub const CUSTOM_HEADER_ENV: &str = "CUSTOM_HEADER";

/// Flag the binary accepts once per extra request header.
pub const HEADER_FLAG: &str = "--header";
