//! `skilldesk identity`: print the hosting platform's application identity.

use anyhow::Result;
use console::style;

use skilldesk_core::identity::AppIdentity;

use crate::state::AppState;

pub async fn show_identity(state: &AppState, json: bool) -> Result<()> {
    let application_id = state.app_identity.get_application_id().await?;
    let bucket = state
        .app_identity
        .get_default_storage_bucket_name()
        .await?;

    if json {
        let out = serde_json::json!({
            "mode": state.config.app_identity.mode,
            "application_id": application_id,
            "default_storage_bucket": bucket,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Application ID:").bold(), style(&application_id).cyan());
    println!("  {}  {}", style("Default bucket:").bold(), bucket);
    println!();

    Ok(())
}
