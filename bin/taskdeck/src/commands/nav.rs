//! Route check — what the guard would do for a path.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use taskdeck_auth::{GuardOutcome, RouteGuard, TokenStore};

use crate::commands::{TermNotifier, current_context, open_store};
use crate::config::ClientConfig;

/// Run the route guard against a path and report where the UI would land.
/// Denials print their notification (via the terminal sink) and redirect
/// to the login route.
pub fn open(path: &str, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    let ctx = current_context(&config)?;
    let kv = open_store(&ctx)?;

    let guard = RouteGuard::new(TokenStore::new(kv), Arc::new(TermNotifier));
    match guard.check_path(path) {
        GuardOutcome::Allow => println!("{path}"),
        GuardOutcome::Deny { redirect, .. } => println!("{}", redirect.path()),
    }
    Ok(())
}
