//! Declarative option schemas and the values checked against them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Value type an option declares in its schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionType {
    Array,
    String,
    Number,
    Boolean,
    InvertedBoolean,
}

/// Flag and type of a single option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    #[serde(default, alias = "param")]
    pub flag: Option<String>,
    #[serde(default, alias = "invertedParam")]
    pub inverted_flag: Option<String>,
}

impl OptionSpec {
    /// Create a spec of the given type without any flags
    #[must_use]
    pub fn new(option_type: OptionType) -> Self {
        Self {
            option_type,
            flag: None,
            inverted_flag: None,
        }
    }

    /// Repeated `flag value` pairs, one per element
    #[must_use]
    pub fn array(flag: impl Into<String>) -> Self {
        Self::new(OptionType::Array).with_flag(flag)
    }

    #[must_use]
    pub fn string(flag: impl Into<String>) -> Self {
        Self::new(OptionType::String).with_flag(flag)
    }

    #[must_use]
    pub fn number(flag: impl Into<String>) -> Self {
        Self::new(OptionType::Number).with_flag(flag)
    }

    #[must_use]
    pub fn boolean(flag: impl Into<String>) -> Self {
        Self::new(OptionType::Boolean).with_flag(flag)
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Flag emitted when a boolean option is `false`
    #[must_use]
    pub fn with_inverted_flag(mut self, flag: impl Into<String>) -> Self {
        self.inverted_flag = Some(flag.into());
        self
    }
}

/// Ordered mapping from option name to its spec
///
/// Iteration follows insertion order, which is the order tokens are emitted
/// in. Names are unique; re-inserting a name replaces its entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSchema {
    entries: Vec<(String, OptionSpec)>,
}

impl OptionSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: OptionSpec) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = spec;
        } else {
            self.entries.push((name, spec));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.entries.iter().map(|(n, spec)| (n.as_str(), spec))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, OptionSpec)> for OptionSchema {
    fn from_iter<I: IntoIterator<Item = (N, OptionSpec)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, spec) in iter {
            schema.insert(name, spec);
        }
        schema
    }
}

/// Runtime value supplied for an option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<OptionValue>),
}

impl OptionValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Textual form used when a value becomes a command-line token. Arrays
/// render their elements comma separated.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Option values keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionValues(HashMap<String, OptionValue>);

impl OptionValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Value for `name`, treating an explicit `Null` as absent
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overlay `other` on top of `self`; keys in `other` win
    pub fn merge(&mut self, other: &OptionValues) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<OptionValue>> FromIterator<(N, V)> for OptionValues {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_keeps_insertion_order() {
        let schema = OptionSchema::new()
            .option("zeta", OptionSpec::string("--zeta"))
            .option("alpha", OptionSpec::string("--alpha"))
            .option("zeta", OptionSpec::number("--zeta"));

        let names: Vec<_> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(
            schema.get("zeta").map(|s| s.option_type),
            Some(OptionType::Number)
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(OptionValue::from(vec![1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(OptionValue::from(1.5).to_string(), "1.5");
        assert_eq!(OptionValue::from(false).to_string(), "false");
        assert_eq!(OptionValue::from("a b").to_string(), "a b");
    }

    #[test]
    fn test_null_reads_as_absent() {
        let values = OptionValues::new()
            .with("dist", Option::<String>::None)
            .with("env", "prod");
        assert!(values.get("dist").is_none());
        assert!(values.contains("env"));
        assert!(!values.is_empty());
    }
}
