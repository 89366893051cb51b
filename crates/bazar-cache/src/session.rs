//! Client identity kept alongside the cart in durable storage.

use crate::{Cache, CacheError, KvStore};
use serde::{Deserialize, Serialize};

/// Storage key holding the current user id.
pub const USER_ID_KEY: &str = "userId";

/// Storage key holding the admin display flag.
pub const ADMIN_FLAG_KEY: &str = "isAdmin";

/// Identity of the person using this client.
///
/// `is_admin` only decides what the client offers to show. It is set locally
/// and can be forged by anyone with access to the storage, so the reporting
/// service must enforce its own authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current user id, if one has been recorded.
    pub user_id: Option<String>,
    /// Display-only admin flag.
    pub is_admin: bool,
}

impl Session {
    /// Load the session from storage. Missing keys yield the defaults.
    pub fn load<S: KvStore>(cache: &Cache<S>) -> Result<Self, CacheError> {
        let user_id = cache
            .get::<String>(USER_ID_KEY)?
            .filter(|id| !id.trim().is_empty());
        let is_admin = cache.get::<bool>(ADMIN_FLAG_KEY)?.unwrap_or(false);
        Ok(Self { user_id, is_admin })
    }

    /// Persist the session. A `None` user id removes the key.
    pub fn save<S: KvStore>(&self, cache: &Cache<S>) -> Result<(), CacheError> {
        match &self.user_id {
            Some(id) => cache.set(USER_ID_KEY, id)?,
            None => cache.delete(USER_ID_KEY)?,
        }
        cache.set(ADMIN_FLAG_KEY, &self.is_admin)
    }
}
