pub mod context;
pub mod login;
pub mod nav;
pub mod task;
pub mod todo;
pub mod users;

use std::sync::Arc;

use anyhow::Result;

use taskdeck_auth::TokenStore;
use taskdeck_core::Notifier;
use taskdeck_kv::{KVStore, RedbStore};
use taskdeck_task::{ApiClient, StoredToken};

use crate::config::{ClientConfig, Context};

/// Resolve the current context from a loaded config.
pub fn current_context(config: &ClientConfig) -> Result<Context> {
    config
        .current()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `taskdeck use context <name>`."))
}

/// Open the context's key-value store, creating the data dir on first use.
pub fn open_store(ctx: &Context) -> Result<Arc<dyn KVStore>> {
    let path = ctx.store_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = RedbStore::open(&path)
        .map_err(|e| anyhow::anyhow!("failed to open store at {:?}: {}", path, e))?;
    Ok(Arc::new(store))
}

/// Build the remote client + token store for a context.
pub fn api_client(ctx: &Context, kv: Arc<dyn KVStore>) -> Result<(ApiClient, TokenStore)> {
    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `taskdeck context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }
    let tokens = TokenStore::new(kv);
    let client = ApiClient::new(&ctx.server, Arc::new(StoredToken::new(tokens.clone())));
    Ok((client, tokens))
}

/// Terminal notification sink — the toast analog. Errors go to stderr so
/// they survive piping of normal output.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}
