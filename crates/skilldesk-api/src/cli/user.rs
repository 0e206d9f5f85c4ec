//! User CLI commands.

use anyhow::Result;
use clap::Subcommand;
use console::style;

use skilldesk_types::user::{Role, UserId};

use crate::state::AppState;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a user (or change its role) and issue an API key.
    Add {
        /// User id.
        user_id: String,

        /// One of: guest, learner, skill_creator, topic_manager, admin.
        #[arg(long, default_value = "skill_creator")]
        role: String,

        /// Only set the role; do not issue a new API key.
        #[arg(long)]
        no_key: bool,
    },
}

pub async fn run(state: &AppState, action: UserCommand, json: bool) -> Result<()> {
    match action {
        UserCommand::Add {
            user_id,
            role,
            no_key,
        } => add_user(state, &user_id, &role, no_key, json).await,
    }
}

async fn add_user(state: &AppState, user_id: &str, role: &str, no_key: bool, json: bool) -> Result<()> {
    let role: Role = role.parse()?;
    let user_id = UserId::new(user_id);

    state.user_service.register_user(&user_id, role).await?;
    let api_key = if no_key {
        None
    } else {
        Some(state.user_service.issue_api_key(&user_id).await?)
    };

    if json {
        let out = serde_json::json!({
            "user_id": user_id,
            "role": role.to_string(),
            "actions": role.actions(),
            "api_key": api_key,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} User '{}' registered as {}",
        style("✓").green().bold(),
        style(&user_id).cyan(),
        style(role).bold()
    );
    if let Some(key) = api_key {
        println!();
        println!(
            "  {} API key (save this -- it won't be shown again):",
            style("🔑").bold()
        );
        println!();
        println!("  {}", style(key).yellow().bold());
    }
    println!();

    Ok(())
}
