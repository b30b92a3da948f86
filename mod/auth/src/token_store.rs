use std::sync::Arc;

use tracing::debug;

use taskdeck_kv::KVStore;

use crate::AuthError;

/// Fixed key the bearer token lives under — one active token per profile.
pub const TOKEN_KEY: &str = "auth:token";

/// Persisted bearer token. Overwritten on login, removed on logout.
///
/// No expiry is enforced locally; an expired token simply causes the next
/// authenticated call to fail with an authorization error.
#[derive(Clone)]
pub struct TokenStore {
    kv: Arc<dyn KVStore>,
}

impl TokenStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Save a token, replacing any previous one.
    pub fn save(&self, token: &str) -> Result<(), AuthError> {
        self.kv.set(TOKEN_KEY, token.as_bytes())?;
        debug!("token saved");
        Ok(())
    }

    /// Get the stored token, if any.
    pub fn get(&self) -> Result<Option<String>, AuthError> {
        match self.kv.get(TOKEN_KEY)? {
            Some(bytes) => {
                let token = String::from_utf8(bytes)
                    .map_err(|e| AuthError::Storage(format!("token is not utf-8: {e}")))?;
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }

    /// Remove the stored token.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.kv.delete(TOKEN_KEY)?;
        debug!("token cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_kv::RedbStore;

    fn test_store() -> (TokenStore, tempfile::NamedTempFile) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        (TokenStore::new(kv), tmp)
    }

    #[test]
    fn save_get_clear() {
        let (store, _tmp) = test_store();

        assert!(store.get().unwrap().is_none());

        store.save("eyJ.abc.def").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("eyJ.abc.def"));

        // Login overwrites the previous token.
        store.save("second").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("second"));

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }
}
