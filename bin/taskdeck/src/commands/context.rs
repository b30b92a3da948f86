//! Context management commands.

use std::path::Path;

use anyhow::Result;

use crate::config::{ClientConfig, Context};

/// Create or update a context's properties.
pub fn set(
    name: &str,
    server: Option<&str>,
    data_dir: Option<&str>,
    config_path: &Path,
) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    let mut ctx = config
        .get_mut(name)
        .cloned()
        .unwrap_or_else(|| Context {
            name: name.to_string(),
            server: String::new(),
            data_dir: String::new(),
        });
    if let Some(server) = server {
        ctx.server = server.trim_end_matches('/').to_string();
    }
    if let Some(data_dir) = data_dir {
        ctx.data_dir = data_dir.to_string();
    }
    config.upsert_context(ctx);

    // First context becomes current automatically.
    if config.current_context.is_empty() {
        config.current_context = name.to_string();
    }

    config.save(config_path)?;
    println!("Context \"{name}\" saved.");
    Ok(())
}

/// List all contexts, marking the current one.
pub fn list(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    if config.contexts.is_empty() {
        println!("No contexts. Run `taskdeck context set <name> --server <url>`.");
        return Ok(());
    }
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context { "*" } else { " " };
        println!("{marker} {}\t{}", ctx.name, ctx.server);
    }
    Ok(())
}

/// Delete a context.
pub fn delete(name: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if !config.remove_context(name) {
        anyhow::bail!("Context \"{name}\" not found.");
    }
    config.save(config_path)?;
    println!("Context \"{name}\" deleted.");
    Ok(())
}

/// Switch the current context.
pub fn use_context(name: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if config.get_mut(name).is_none() {
        anyhow::bail!("Context \"{name}\" not found.");
    }
    config.current_context = name.to_string();
    config.save(config_path)?;
    println!("Switched to context \"{name}\".");
    Ok(())
}
