//! gsoc2-bridge - command bridge for the gsoc2-cli native binary
//!
//! Parses arguments, builds the invocation config and drives the ops crate
//! while logging bridge events.

mod cli;
mod error;
mod logging;

use crate::cli::{Cli, Commands, GlobalArgs, ReleasesCommands};
use crate::error::CliError;
use clap::Parser;
use gsoc2_config::ExecConfig;
use gsoc2_events::EventReceiver;
use gsoc2_ops::{
    ExecOutput, Gsoc2Cli, ReleaseOptions, SetCommitsOptions, SourceMapInclude,
    UploadSourceMapsOptions,
};
use gsoc2_types::OptionValues;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.debug, cli.global.json_logs);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting gsoc2-bridge v{}", env!("CARGO_PKG_VERSION"));

    // File config first, flags on top
    let mut config = ExecConfig::load_or_default(cli.global.config.as_deref()).await?;
    config.merge(&config_from_flags(&cli.global));

    let (event_sender, event_receiver) = gsoc2_events::channel();
    let client = Gsoc2Cli::new(cli.global.properties.clone(), config)
        .with_event_sender(event_sender)
        .silent(cli.global.silent);

    let output = execute_command_with_events(cli.command, client, event_receiver).await?;
    if let Some(text) = output {
        print!("{text}");
    }

    info!("Command completed successfully");
    Ok(())
}

fn config_from_flags(global: &GlobalArgs) -> ExecConfig {
    ExecConfig {
        url: global.url.clone(),
        auth_token: global.auth_token.clone(),
        api_key: global.api_key.clone(),
        dsn: global.dsn.clone(),
        org: global.org.clone(),
        project: global.project.clone(),
        vcs_remote: global.vcs_remote.clone(),
        custom_header: global.custom_header.clone(),
        headers: global.headers.clone(),
    }
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    client: Gsoc2Cli,
    mut event_receiver: EventReceiver,
) -> Result<Option<String>, CliError> {
    let mut command_future = Box::pin(execute_command(command, &client));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(message) = event_receiver.try_recv() {
                    logging::log_event_with_tracing(&message);
                }
                return result;
            }

            message = event_receiver.recv() => {
                if let Some(message) = message {
                    logging::log_event_with_tracing(&message);
                }
            }
        }
    }
}

/// Execute the specified command, returning text for stdout
async fn execute_command(command: Commands, client: &Gsoc2Cli) -> Result<Option<String>, CliError> {
    match command {
        Commands::Path => {
            let path = client.binary_path().await?;
            Ok(Some(format!("{}\n", path.display())))
        }

        Commands::Version => {
            let version = client.version().await?;
            Ok(Some(format!("{version}\n")))
        }

        Commands::Exec { capture, args } => match client.execute(args, !capture).await? {
            ExecOutput::Captured(stdout) => Ok(Some(stdout)),
            ExecOutput::Streamed => Ok(None),
        },

        Commands::Releases(releases_cmd) => {
            let releases = client.releases();
            match releases_cmd {
                ReleasesCommands::New { release, projects } => {
                    let output = releases
                        .new_release(&release, &ReleaseOptions { projects })
                        .await?;
                    Ok(Some(output))
                }
                ReleasesCommands::SetCommits {
                    release,
                    auto,
                    repo,
                    commit,
                    previous_commit,
                    ignore_missing,
                } => {
                    let options = SetCommitsOptions {
                        auto,
                        repo,
                        commit,
                        previous_commit,
                        ignore_missing,
                    };
                    Ok(Some(releases.set_commits(&release, &options).await?))
                }
                ReleasesCommands::Finalize { release } => {
                    Ok(Some(releases.finalize(&release).await?))
                }
                ReleasesCommands::ProposeVersion => {
                    let version = releases.propose_version().await?;
                    Ok(Some(format!("{version}\n")))
                }
                ReleasesCommands::UploadSourcemaps {
                    release,
                    include,
                    projects,
                    options,
                } => {
                    let options = UploadSourceMapsOptions {
                        include: include.into_iter().map(SourceMapInclude::Path).collect(),
                        projects,
                        options: parse_options(options.as_deref())?,
                    };
                    releases.upload_source_maps(&release, &options).await?;
                    Ok(None)
                }
                ReleasesCommands::ListDeploys { release } => {
                    Ok(Some(releases.list_deploys(&release).await?))
                }
                ReleasesCommands::NewDeploy {
                    release,
                    env,
                    name,
                    deploy_url,
                    time,
                } => {
                    let options = OptionValues::new()
                        .with("env", env)
                        .with("name", name)
                        .with("url", deploy_url)
                        .with("time", time);
                    Ok(Some(releases.new_deploy(&release, &options).await?))
                }
            }
        }
    }
}

fn parse_options(raw: Option<&str>) -> Result<OptionValues, CliError> {
    match raw {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| CliError::InvalidArguments(format!("--options: {e}"))),
        None => Ok(OptionValues::new()),
    }
}

/// Initialize tracing/logging on stderr; stdout carries command output
fn init_tracing(debug_enabled: bool, json: bool) {
    let default_filter = if debug_enabled {
        "info,gsoc2_bridge=debug,gsoc2_exec=debug,gsoc2_platform=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
