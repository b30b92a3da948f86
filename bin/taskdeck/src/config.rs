//! Client-side context management.
//!
//! Reads/writes `~/.taskdeck/config.toml`. A context names a server plus
//! the local data directory holding that profile's key-value store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single context — one server + one local profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "staging").
    pub name: String,

    /// Server URL (e.g. "http://localhost:8080"). Empty for todo-only use.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Directory holding this profile's store. Defaults to
    /// `~/.taskdeck/<name>` when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,
}

impl Context {
    /// Path of the profile's key-value store file.
    pub fn store_path(&self) -> PathBuf {
        let dir = if self.data_dir.is_empty() {
            dirs_path().join(&self.name)
        } else {
            PathBuf::from(&self.data_dir)
        };
        dir.join("store.redb")
    }
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    /// List of configured contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ClientConfig {
    /// Default config file path: ~/.taskdeck/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the currently active context, if any.
    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    /// Get a mutable reference to a context by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn upsert_context(&mut self, ctx: Context) {
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }
}

/// Return the taskdeck config directory (~/.taskdeck).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".taskdeck")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.current_context.is_empty());
        assert!(config.contexts.is_empty());
        assert!(config.current().is_none());
    }

    #[test]
    fn test_roundtrip() {
        let mut config = ClientConfig::default();
        config.current_context = "test".to_string();
        config.contexts.push(Context {
            name: "test".to_string(),
            server: "http://localhost:8080".to_string(),
            data_dir: "/tmp/taskdeck-test".to_string(),
        });

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.current_context, "test");
        assert_eq!(back.contexts.len(), 1);
        assert_eq!(back.contexts[0].server, "http://localhost:8080");
        assert_eq!(
            back.contexts[0].store_path(),
            PathBuf::from("/tmp/taskdeck-test/store.redb")
        );
    }

    #[test]
    fn test_remove_context_resets_current() {
        let mut config = ClientConfig::default();
        config.current_context = "a".to_string();
        config.upsert_context(Context {
            name: "a".to_string(),
            server: String::new(),
            data_dir: String::new(),
        });

        assert!(config.remove_context("a"));
        assert!(config.current_context.is_empty());
        assert!(!config.remove_context("a"));
    }
}
