//! CLI command definitions for the `skilldesk` binary.
//!
//! Uses clap derive macros for argument parsing. Resource commands follow a
//! noun-verb pattern (e.g., `skilldesk skill create`, `skilldesk user add`).

pub mod identity;
pub mod skill;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Skill editor backend for SkillDesk.
#[derive(Parser)]
#[command(name = "skilldesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "SKILLDESK_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the skill editor HTTP server.
    Serve {
        /// Address to listen on (overrides `bind` in config.toml).
        #[arg(long, env = "SKILLDESK_BIND")]
        bind: Option<String>,

        /// Enable the skill editor endpoints regardless of config.toml.
        #[arg(long, env = "SKILLDESK_ENABLE_NEW_STRUCTURES")]
        enable_new_structures: bool,
    },

    /// Manage skills (create, list, show, history).
    Skill {
        #[command(subcommand)]
        action: skill::SkillCommand,
    },

    /// Manage users and their API keys.
    User {
        #[command(subcommand)]
        action: user::UserCommand,
    },

    /// Show the application id and default storage bucket.
    Identity,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "skilldesk",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--enable-new-structures",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                bind,
                enable_new_structures,
            } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0:9000"));
                assert!(enable_new_structures);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_user_add_defaults_to_skill_creator() {
        let cli = Cli::try_parse_from(["skilldesk", "--json", "user", "add", "ada"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::User {
                action: user::UserCommand::Add { user_id, role, no_key },
            } => {
                assert_eq!(user_id, "ada");
                assert_eq!(role, "skill_creator");
                assert!(!no_key);
            }
            _ => panic!("expected user add"),
        }
    }
}
