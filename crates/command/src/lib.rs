#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Argument list construction for the native binary
//!
//! Turns an [`OptionSchema`] plus the caller's [`OptionValues`] into argv
//! tokens. Everything here is pure: the same inputs always give the same
//! tokens, in schema order.

use gsoc2_errors::SchemaError;
use gsoc2_types::{OptionSchema, OptionSpec, OptionType, OptionValues};

/// Subcommand tokens placed ahead of the serialized options
///
/// A single string is one token; sequences are taken in order.
pub trait CommandTokens {
    fn into_tokens(self) -> Vec<String>;
}

impl CommandTokens for &str {
    fn into_tokens(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl CommandTokens for String {
    fn into_tokens(self) -> Vec<String> {
        vec![self]
    }
}

impl CommandTokens for Vec<String> {
    fn into_tokens(self) -> Vec<String> {
        self
    }
}

impl CommandTokens for Vec<&str> {
    fn into_tokens(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl CommandTokens for &[&str] {
    fn into_tokens(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl CommandTokens for &[String] {
    fn into_tokens(self) -> Vec<String> {
        self.to_vec()
    }
}

impl<const N: usize> CommandTokens for [&str; N] {
    fn into_tokens(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

/// Serialize option values into argv tokens following `schema`
///
/// Options absent from `values` (or set to null) contribute nothing. Keys in
/// `values` that the schema does not declare are ignored.
///
/// # Errors
///
/// Returns a [`SchemaError`] naming the first option whose value does not
/// match its declared type, or that has a value but no flag to emit.
pub fn serialize_options(
    schema: &OptionSchema,
    values: &OptionValues,
) -> Result<Vec<String>, SchemaError> {
    let mut tokens = Vec::new();

    for (name, spec) in schema.iter() {
        let Some(value) = values.get(name) else {
            continue;
        };

        match spec.option_type {
            OptionType::Array => {
                let items = value.as_array().ok_or_else(|| SchemaError::ExpectedArray {
                    option: name.to_string(),
                })?;
                let flag = required_flag(name, spec)?;
                for item in items {
                    tokens.push(flag.to_string());
                    tokens.push(item.to_string());
                }
            }
            OptionType::Boolean => {
                let enabled = value.as_bool().ok_or_else(|| SchemaError::ExpectedBool {
                    option: name.to_string(),
                })?;
                let flag = if enabled {
                    spec.flag.as_deref()
                } else {
                    spec.inverted_flag.as_deref()
                };
                if let Some(flag) = flag {
                    tokens.push(flag.to_string());
                }
            }
            OptionType::String | OptionType::Number | OptionType::InvertedBoolean => {
                let flag = required_flag(name, spec)?;
                tokens.push(flag.to_string());
                tokens.push(value.to_string());
            }
        }
    }

    tracing::trace!(count = tokens.len(), "serialized options");
    Ok(tokens)
}

/// Command tokens followed by the serialized options
///
/// # Errors
///
/// Propagates the [`SchemaError`] from [`serialize_options`].
pub fn prepare_command(
    command: impl CommandTokens,
    schema: &OptionSchema,
    values: &OptionValues,
) -> Result<Vec<String>, SchemaError> {
    let mut tokens = command.into_tokens();
    tokens.extend(serialize_options(schema, values)?);
    Ok(tokens)
}

fn required_flag<'a>(name: &str, spec: &'a OptionSpec) -> Result<&'a str, SchemaError> {
    spec.flag.as_deref().ok_or_else(|| SchemaError::MissingFlag {
        option: name.to_string(),
    })
}
