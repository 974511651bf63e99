use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use storage::Storage;
use tracing::debug;

pub const DEFAULT_SEARCH_TERM: &str = "React";
pub const SEARCH_TERM_KEY: &str = "search";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, scope: &str, key: &str) -> Result<Option<String>>;
    async fn write(&self, scope: &str, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl KeyValueStore for Storage {
    async fn read(&self, scope: &str, key: &str) -> Result<Option<String>> {
        self.read_value(scope, key).await
    }

    async fn write(&self, scope: &str, key: &str, value: &str) -> Result<()> {
        self.write_value(scope, key, value).await
    }
}

/// The last committed search term. Read once by [`Self::load`]; written back
/// on every committed change.
pub struct SearchTermSetting {
    store: Arc<dyn KeyValueStore>,
    scope: String,
    key: String,
    value: String,
}

impl SearchTermSetting {
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        scope: impl Into<String>,
        key: impl Into<String>,
        default: &str,
    ) -> Result<Self> {
        let scope = scope.into();
        let key = key.into();
        let stored = store.read(&scope, &key).await?;
        debug!(%scope, %key, found = stored.is_some(), "loaded search term");

        Ok(Self {
            value: stored.unwrap_or_else(|| default.to_string()),
            store,
            scope,
            key,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub async fn save(&self) -> Result<()> {
        self.store.write(&self.scope, &self.key, &self.value).await
    }

    /// Sets and persists `term`. Returns `false` without writing when it is
    /// already the committed value.
    pub async fn commit(&mut self, term: &str) -> Result<bool> {
        if self.value == term {
            return Ok(false);
        }
        self.value = term.to_string();
        self.save().await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/persistence_tests.rs"]
mod tests;
