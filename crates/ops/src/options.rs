//! Typed options for release subcommands

use gsoc2_types::OptionValues;
use serde::{Deserialize, Serialize};

/// Options of `releases new`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseOptions {
    /// Each becomes `-p <project>`
    pub projects: Vec<String>,
}

impl ReleaseOptions {
    pub(crate) fn project_args(&self) -> Vec<String> {
        project_args(&self.projects)
    }
}

pub(crate) fn project_args(projects: &[String]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|project| ["-p".to_string(), project.clone()])
        .collect()
}

/// Options of `releases set-commits`
///
/// Either `auto`, or both `repo` and `commit`, must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SetCommitsOptions {
    pub auto: bool,
    pub repo: Option<String>,
    pub commit: Option<String>,
    pub previous_commit: Option<String>,
    pub ignore_missing: bool,
}

/// One entry of [`UploadSourceMapsOptions::include`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceMapInclude {
    /// A single path uploaded with the shared options
    Path(String),
    /// Several paths with options overriding the shared ones
    Entry {
        paths: Vec<String>,
        #[serde(flatten)]
        options: OptionValues,
    },
}

impl SourceMapInclude {
    #[must_use]
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Path(path) => std::slice::from_ref(path),
            Self::Entry { paths, .. } => paths,
        }
    }
}

impl From<&str> for SourceMapInclude {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for SourceMapInclude {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// Options of `sourcemaps upload`
///
/// `options` holds values checked against [`crate::schemas::source_maps`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadSourceMapsOptions {
    pub include: Vec<SourceMapInclude>,
    pub projects: Vec<String>,
    #[serde(flatten)]
    pub options: OptionValues,
}

impl UploadSourceMapsOptions {
    pub fn new<I, P>(include: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<SourceMapInclude>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_option(
        mut self,
        name: impl Into<String>,
        value: impl Into<gsoc2_types::OptionValue>,
    ) -> Self {
        self.options.insert(name, value);
        self
    }
}
