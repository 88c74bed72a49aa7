//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gsoc2-bridge - run the gsoc2-cli native binary
#[derive(Parser)]
#[command(name = "gsoc2-bridge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Locate and run the gsoc2-cli native binary")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Bridge config file (TOML)
    #[arg(long, global = true, value_name = "PATH", env = "GSOC2_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Properties file handed to gsoc2-cli
    #[arg(long, global = true, value_name = "PATH")]
    pub properties: Option<PathBuf>,

    /// Service URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Auth token
    #[arg(long, global = true)]
    pub auth_token: Option<String>,

    /// Legacy API key
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub dsn: Option<String>,

    #[arg(long, global = true)]
    pub org: Option<String>,

    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Remote used to detect the repository
    #[arg(long, global = true)]
    pub vcs_remote: Option<String>,

    /// Extra request header, repeatable
    #[arg(long = "header", global = true, value_name = "KEY:VALUE")]
    pub headers: Vec<gsoc2_config::Header>,

    /// Raw header passed as CUSTOM_HEADER; overrides --header
    #[arg(long, global = true, value_name = "KEY:VALUE")]
    pub custom_header: Option<String>,

    /// Discard output of live runs
    #[arg(long, global = true)]
    pub silent: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the path of the binary that would run
    Path,

    /// Print the version reported by the binary
    Version,

    /// Run the binary with arbitrary arguments
    Exec {
        /// Capture output and print it once the binary exits; a nonzero
        /// exit fails the command
        #[arg(long)]
        capture: bool,

        /// Arguments passed through unchanged
        #[arg(last = true, required = true)]
        args: Vec<String>,
    },

    /// Release management
    #[command(subcommand)]
    Releases(ReleasesCommands),
}

#[derive(Subcommand)]
pub enum ReleasesCommands {
    /// Create a release
    New {
        release: String,

        /// Project to associate, repeatable
        #[arg(short = 'p', long = "project-slug")]
        projects: Vec<String>,
    },

    /// Associate commits with a release
    SetCommits {
        release: String,

        /// Detect commits automatically
        #[arg(long, conflicts_with_all = ["repo", "commit"])]
        auto: bool,

        #[arg(long, requires = "commit")]
        repo: Option<String>,

        #[arg(long, requires = "repo")]
        commit: Option<String>,

        #[arg(long, requires = "commit")]
        previous_commit: Option<String>,

        #[arg(long)]
        ignore_missing: bool,
    },

    /// Mark a release as finished
    Finalize { release: String },

    /// Print a suggested release version
    ProposeVersion,

    /// Upload source maps
    UploadSourcemaps {
        release: String,

        /// Paths to upload
        #[arg(required = true)]
        include: Vec<String>,

        #[arg(short = 'p', long = "project-slug")]
        projects: Vec<String>,

        /// Extra options as a JSON object, e.g. '{"rewrite": true}'
        #[arg(long, value_name = "JSON")]
        options: Option<String>,
    },

    /// List deploys of a release
    ListDeploys { release: String },

    /// Record a deploy of a release
    NewDeploy {
        release: String,

        #[arg(short, long)]
        env: String,

        #[arg(short, long)]
        name: Option<String>,

        /// URL of the deployed application
        #[arg(long = "deploy-url")]
        deploy_url: Option<String>,

        /// Deploy duration in seconds
        #[arg(short, long)]
        time: Option<i64>,
    },
}
