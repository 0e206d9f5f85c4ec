//! Skill CLI commands: create, list, show, history.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use skilldesk_types::commit::CommitType;
use skilldesk_types::skill::SkillId;
use skilldesk_types::user::UserId;

use crate::state::AppState;

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Create a new private skill.
    Create {
        /// User recorded as the skill's creator.
        #[arg(long)]
        creator: String,

        /// Short description of the skill.
        #[arg(long)]
        description: String,
    },

    /// List all skills.
    #[command(alias = "ls")]
    List,

    /// Show a skill's full content.
    Show {
        /// Skill id.
        skill_id: String,
    },

    /// Show the commit history of a skill.
    History {
        /// Skill id.
        skill_id: String,
    },
}

pub async fn run(state: &AppState, action: SkillCommand, json: bool) -> Result<()> {
    match action {
        SkillCommand::Create {
            creator,
            description,
        } => create_skill(state, &creator, &description, json).await,
        SkillCommand::List => list_skills(state, json).await,
        SkillCommand::Show { skill_id } => show_skill(state, &skill_id, json).await,
        SkillCommand::History { skill_id } => skill_history(state, &skill_id, json).await,
    }
}

async fn create_skill(state: &AppState, creator: &str, description: &str, json: bool) -> Result<()> {
    let skill = state
        .skill_service
        .create_skill(&UserId::new(creator), description)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skill)?);
        return Ok(());
    }

    println!();
    println!("  {} Skill created", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("ID:").bold(), style(&skill.id).cyan());
    println!("  {}  {}", style("Description:").bold(), skill.description);
    println!("  {}  {}", style("Creator:").bold(), creator);
    println!("  {}  v{} (private)", style("Version:").bold(), skill.version);
    println!();
    println!(
        "  Edit it at {}",
        style(format!("/skill_editor/{}", skill.id)).yellow()
    );
    println!();

    Ok(())
}

async fn list_skills(state: &AppState, json: bool) -> Result<()> {
    let skills = state.skill_service.list_skill_summaries().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!();
        println!(
            "  {} No skills yet. Create one with: {}",
            style("i").blue().bold(),
            style("skilldesk skill create --creator <user> --description <text>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Lang").fg(Color::White),
        Cell::new("Version").fg(Color::White),
        Cell::new("Visibility").fg(Color::White),
        Cell::new("Misconceptions").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for skill in &skills {
        let visibility = if skill.skill_is_private {
            Cell::new("○ private").fg(Color::Yellow)
        } else {
            Cell::new("● public").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(skill.id.as_str()).fg(Color::Cyan),
            Cell::new(truncate(&skill.description, 50)),
            Cell::new(&skill.language_code),
            Cell::new(format!("v{}", skill.version)),
            visibility,
            Cell::new(skill.misconception_count),
            Cell::new(skill.updated_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} skill{}",
        style(skills.len()).bold(),
        if skills.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

async fn show_skill(state: &AppState, skill_id: &str, json: bool) -> Result<()> {
    let id: SkillId = skill_id.parse()?;
    let skill = state
        .skill_service
        .get_skill_by_id(&id, true)
        .await?
        .ok_or_else(|| anyhow::anyhow!("skill '{id}' not found"))?;
    let rights = state.skill_service.get_skill_rights(&id, false).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "skill": skill,
                "rights": rights,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&skill.description).cyan().bold(),
        style(format!("({})", skill.id)).dim()
    );
    println!();
    println!("  {}  v{}", style("Version:").bold(), skill.version);
    println!("  {}  {}", style("Language:").bold(), skill.language_code);
    if let Some(rights) = &rights {
        let visibility = if rights.skill_is_private { "private" } else { "public" };
        println!("  {}  {}", style("Visibility:").bold(), visibility);
        println!("  {}  {}", style("Creator:").bold(), rights.creator_id);
    }
    println!();

    println!("  {}", style("Explanation").bold().underlined());
    if skill.skill_contents.explanation.is_empty() {
        println!("  {}", style("(empty)").dim());
    } else {
        for line in skill.skill_contents.explanation.lines() {
            println!("  {line}");
        }
    }
    println!();

    if !skill.skill_contents.worked_examples.is_empty() {
        println!("  {}", style("Worked examples").bold().underlined());
        for example in &skill.skill_contents.worked_examples {
            println!("    {} {}", style("•").dim(), example);
        }
        println!();
    }

    if !skill.misconceptions.is_empty() {
        println!("  {}", style("Misconceptions").bold().underlined());
        for m in &skill.misconceptions {
            println!("    {} {}", style(format!("#{}", m.id)).dim(), m.name);
            if !m.feedback.is_empty() {
                println!("       {}", style(&m.feedback).dim());
            }
        }
        println!();
    }

    Ok(())
}

async fn skill_history(state: &AppState, skill_id: &str, json: bool) -> Result<()> {
    let id: SkillId = skill_id.parse()?;
    let commits = state.skill_service.get_skill_commits(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&commits)?);
        return Ok(());
    }

    if commits.is_empty() {
        println!();
        println!("  {} No history for skill '{}'", style("i").blue().bold(), id);
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Version").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Committer").fg(Color::White),
        Cell::new("Message").fg(Color::White),
        Cell::new("Changes").fg(Color::White),
        Cell::new("When").fg(Color::White),
    ]);

    for commit in &commits {
        let type_color = match commit.commit_type {
            CommitType::Create => Color::Green,
            CommitType::Edit => Color::Cyan,
            CommitType::Publish => Color::Magenta,
            CommitType::Delete => Color::Red,
        };
        let cmds = commit
            .commit_cmds
            .iter()
            .map(|c| c.cmd())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(format!("v{}", commit.version)),
            Cell::new(commit.commit_type.to_string()).fg(type_color),
            Cell::new(commit.committer_id.as_str()),
            Cell::new(truncate(&commit.commit_message, 50)),
            Cell::new(cmds).fg(Color::DarkGrey),
            Cell::new(commit.created_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
