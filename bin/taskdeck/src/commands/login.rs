//! Remote auth commands: login/logout and account lifecycle.

use std::path::Path;

use anyhow::Result;

use taskdeck_auth::Route;
use taskdeck_task::RegisterRequest;

use crate::commands::{api_client, current_context, open_store};
use crate::config::ClientConfig;

/// Login to the current context's server. The token lands in the
/// profile's store; the printed route is where the UI would navigate.
pub async fn login(username: &str, password: &str, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, tokens) = api_client(&ctx, kv)?;

    let role = client
        .login(&tokens, username, password)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {e}"))?;

    println!("Logged in as {username} ({role}).");
    println!("Landing on {}.", Route::dashboard_for(role).path());
    Ok(())
}

/// Logout — clear the stored token.
pub async fn logout(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, tokens) = api_client(&ctx, kv)?;

    client.logout(&tokens)?;
    println!("Logged out.");
    Ok(())
}

/// Register a new account; the server mails a confirmation link.
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
    config_path: &Path,
) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let message = client
        .register(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Registration failed: {e}"))?;
    println!("{message}");
    Ok(())
}

/// Request a password-reset mail.
pub async fn forgot_password(email: &str, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let message = client
        .forgot_password(email)
        .await
        .map_err(|e| anyhow::anyhow!("Request failed: {e}"))?;
    println!("{message}");
    Ok(())
}

/// Set a new password using the emailed reset token.
pub async fn reset_password(token: &str, new_password: &str, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let message = client
        .reset_password(token, new_password)
        .await
        .map_err(|e| anyhow::anyhow!("Reset failed: {e}"))?;
    println!("{message}");
    Ok(())
}

/// Confirm a registration via the emailed token.
pub async fn confirm(token: &str, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;
    let (client, _tokens) = api_client(&ctx, kv)?;

    let message = client
        .confirm_registration(token)
        .await
        .map_err(|e| anyhow::anyhow!("Confirmation failed: {e}"))?;
    println!("{message}");
    Ok(())
}
