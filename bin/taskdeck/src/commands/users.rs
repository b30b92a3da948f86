//! User administration commands (admin dashboard surface).

use std::path::Path;

use anyhow::Result;

use taskdeck_auth::Role;

use crate::commands::{api_client, current_context, open_store};
use crate::config::ClientConfig;

/// List all users.
pub async fn list(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let users = client
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch users: {e}"))?;

    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }
    println!("{:<6} {:<20} {:<28} {:<10} {}", "ID", "USERNAME", "EMAIL", "ROLE", "ENABLED");
    for user in &users {
        println!(
            "{:<6} {:<20} {:<28} {:<10} {}",
            user.id,
            user.username,
            user.email,
            user.primary_role(),
            user.enabled
        );
    }
    Ok(())
}

/// Change a user's role.
pub async fn set_role(user_id: i64, role: &str, config_path: &Path) -> Result<()> {
    let role = Role::from_str(&role.to_uppercase())
        .ok_or_else(|| anyhow::anyhow!("Role must be ADMIN, MANAGER, or EMPLOYEE."))?;

    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let user = client
        .update_user_role(user_id, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {e}"))?;
    println!("{} is now {}.", user.username, user.primary_role());
    Ok(())
}

/// Delete a user.
pub async fn delete(user_id: i64, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    client
        .delete_user(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {e}"))?;
    println!("User {user_id} deleted.");
    Ok(())
}
