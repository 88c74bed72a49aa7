//! `releases` and `sourcemaps` subcommands

use futures::future::try_join_all;
use gsoc2_command::prepare_command;
use gsoc2_errors::{Error, OpsError};
use gsoc2_types::{OptionValue, OptionValues};
use tracing::debug;

use crate::client::Gsoc2Cli;
use crate::options::{
    project_args, ReleaseOptions, SetCommitsOptions, SourceMapInclude, UploadSourceMapsOptions,
};
use crate::schemas::{self, DEFAULT_IGNORE};

/// Release management, borrowed from a [`Gsoc2Cli`]
#[derive(Debug, Clone, Copy)]
pub struct Releases<'a> {
    cli: &'a Gsoc2Cli,
}

impl<'a> Releases<'a> {
    pub(crate) fn new(cli: &'a Gsoc2Cli) -> Self {
        Self { cli }
    }

    /// Create a release
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation fails.
    pub async fn new_release(
        &self,
        release: &str,
        options: &ReleaseOptions,
    ) -> Result<String, Error> {
        let mut args = vec!["releases".to_string(), "new".to_string(), release.to_string()];
        args.extend(options.project_args());
        self.cli.capture(args).await
    }

    /// Associate commits with a release
    ///
    /// # Errors
    ///
    /// Returns `OpsError::InvalidOptions` unless `auto` is set or both `repo`
    /// and `commit` are given, and an error if the invocation fails.
    pub async fn set_commits(
        &self,
        release: &str,
        options: &SetCommitsOptions,
    ) -> Result<String, Error> {
        let mut args = vec![
            "releases".to_string(),
            "set-commits".to_string(),
            release.to_string(),
        ];
        args.extend(commit_args(options)?);
        self.cli.capture(args).await
    }

    /// Mark a release as finished
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation fails.
    pub async fn finalize(&self, release: &str) -> Result<String, Error> {
        self.cli.capture(["releases", "finalize", release]).await
    }

    /// Version string the binary suggests for a new release
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation fails.
    pub async fn propose_version(&self) -> Result<String, Error> {
        let output = self.cli.capture(["releases", "propose-version"]).await?;
        Ok(output.trim().to_string())
    }

    /// Upload source maps, one live invocation per included path
    ///
    /// Uploads run concurrently; the first failure fails the call.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::InvalidOptions` when `include` is empty or an entry
    /// has no paths, a schema error when an option has the wrong type, and an
    /// error if any upload cannot be spawned.
    pub async fn upload_source_maps(
        &self,
        release: &str,
        options: &UploadSourceMapsOptions,
    ) -> Result<(), Error> {
        let invocations = source_map_invocations(release, options)?;
        debug!(release, uploads = invocations.len(), "uploading source maps");

        try_join_all(invocations.into_iter().map(|args| self.cli.execute(args, true))).await?;
        Ok(())
    }

    /// List the deploys of a release
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation fails.
    pub async fn list_deploys(&self, release: &str) -> Result<String, Error> {
        self.cli
            .capture(["releases", "deploys", release, "list"])
            .await
    }

    /// Record a deploy of a release
    ///
    /// `options` is checked against [`schemas::deploys`]; `env` is required.
    ///
    /// # Errors
    ///
    /// Returns `OpsError::MissingOption` without an `env`, a schema error for
    /// mistyped options, and an error if the invocation fails.
    pub async fn new_deploy(&self, release: &str, options: &OptionValues) -> Result<String, Error> {
        if !options
            .get("env")
            .and_then(OptionValue::as_str)
            .is_some_and(|env| !env.is_empty())
        {
            return Err(OpsError::MissingOption {
                option: "env".to_string(),
            }
            .into());
        }

        let args = prepare_command(
            ["releases", "deploys", release, "new"],
            &schemas::deploys(),
            options,
        )?;
        self.cli.capture(args).await
    }
}

fn commit_args(options: &SetCommitsOptions) -> Result<Vec<String>, OpsError> {
    let mut args = if options.auto {
        vec!["--auto".to_string()]
    } else {
        let (Some(repo), Some(commit)) = (options.repo.as_deref(), options.commit.as_deref())
        else {
            return Err(OpsError::InvalidOptions {
                message: "set `auto`, or both `repo` and `commit`".to_string(),
            });
        };
        let range = match options.previous_commit.as_deref() {
            Some(previous) => format!("{repo}@{previous}..{commit}"),
            None => format!("{repo}@{commit}"),
        };
        vec!["--commit".to_string(), range]
    };

    if options.ignore_missing {
        args.push("--ignore-missing".to_string());
    }
    Ok(args)
}

/// Argument lists for every upload, in include order
fn source_map_invocations(
    release: &str,
    options: &UploadSourceMapsOptions,
) -> Result<Vec<Vec<String>>, Error> {
    if options.include.is_empty() {
        return Err(OpsError::InvalidOptions {
            message: "`include` must list at least one path".to_string(),
        }
        .into());
    }

    let schema = schemas::source_maps();
    let mut base = vec!["sourcemaps".to_string(), "upload".to_string()];
    base.extend(project_args(&options.projects));
    base.push("--release".to_string());
    base.push(release.to_string());

    let mut invocations = Vec::new();
    for entry in &options.include {
        let mut values = options.options.clone();
        if let SourceMapInclude::Entry { paths, options } = entry {
            if paths.is_empty() {
                return Err(OpsError::InvalidOptions {
                    message: "path descriptors in `include` need a non-empty `paths`".to_string(),
                }
                .into());
            }
            values.merge(options);
        }
        if !values.contains("ignore") && !values.contains("ignoreFile") {
            values.insert("ignore", DEFAULT_IGNORE.to_vec());
        }

        for path in entry.paths() {
            let mut command = base.clone();
            command.push(path.clone());
            invocations.push(prepare_command(command, &schema, &values)?);
        }
    }
    Ok(invocations)
}
