// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tagflow - command-line client for a tagged-file catalog.

mod app;
mod commands;
mod prompt;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tagflow_config::TagflowConfig;
use tagflow_core::TagflowError;
use tagflow_session::SessionEvent;

use crate::app::App;
use crate::commands::LoginOutcome;

/// Tagflow - browse a tagged-file catalog from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tagflow", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and store the session token.
    Login {
        /// Account name.
        username: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the backend and session state.
    Status,
    /// Print the tag hierarchy.
    Tags,
    /// List files, optionally under a tag (including its descendants).
    Files {
        /// Tag id to filter by.
        #[arg(long = "tag")]
        tag_id: Option<i64>,
        /// Page number (backend default 1).
        #[arg(long)]
        page: Option<u32>,
        /// Page size (backend default 50).
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Change the account password.
    Passwd,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tagflow_config::load_and_validate_path(path),
        None => tagflow_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tagflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let color = !cli.plain && std::io::stdout().is_terminal();
    if let Err(e) = run(cli.command, config, color).await {
        eprintln!("{} {e}", "error:".red().bold());
        if let TagflowError::LoginRequired { .. } = e {
            eprintln!("run `tagflow login <username>` first");
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: TagflowConfig, color: bool) -> Result<(), TagflowError> {
    let mut app = App::build(config)?;

    let result = dispatch(&app, command, color).await;

    // A 401 anywhere above has already invalidated the session.
    for event in app.drain_session_events() {
        if let SessionEvent::Invalidated { .. } = event {
            eprintln!(
                "{}",
                "session expired; run `tagflow login <username>` to sign in again".yellow()
            );
        }
    }
    result
}

async fn dispatch(app: &App, command: Commands, color: bool) -> Result<(), TagflowError> {
    match command {
        Commands::Login { username } => {
            let password = prompt::login_password()?;
            match commands::login(app, &username, &password).await? {
                LoginOutcome::LoggedIn { username } => println!("logged in as {username}"),
                LoginOutcome::AlreadyLoggedIn { username } => {
                    println!("already logged in as {username}; run `tagflow logout` first")
                }
            }
        }
        Commands::Logout => {
            if commands::logout(app) {
                println!("logged out");
            } else {
                println!("not logged in");
            }
        }
        Commands::Status => print!("{}", commands::status(app, color)),
        Commands::Tags => print!("{}", commands::tags(app).await?),
        Commands::Files {
            tag_id,
            page,
            limit,
        } => print!(
            "{}",
            commands::files(app, tag_id, page, limit, color).await?
        ),
        Commands::Passwd => {
            let (old, new) = prompt::password_change()?;
            commands::change_password(app, &old, &new).await?;
            println!("password updated");
        }
    }
    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tagflow={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn files_flags_parse() {
        let cli = Cli::try_parse_from(["tagflow", "files", "--tag", "5", "--limit", "20"]).unwrap();
        match cli.command {
            Commands::Files {
                tag_id,
                page,
                limit,
            } => {
                assert_eq!(tag_id, Some(5));
                assert_eq!(page, None);
                assert_eq!(limit, Some(20));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["tagflow", "status", "--plain", "--config", "x.toml"])
            .unwrap();
        assert!(cli.plain);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    #[serial_test::serial]
    fn binary_loads_config_defaults() {
        figment::Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("HOME", &home);
            jail.set_env("XDG_CONFIG_HOME", &home);
            let config = tagflow_config::load_and_validate().expect("default config should be valid");
            assert_eq!(config.client.timeout_secs, 10);
            Ok(())
        });
    }
}
