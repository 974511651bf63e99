use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Scoped string key/value store on top of SQLite.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub scope: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);

        // Every connection to `sqlite::memory:` opens a fresh database, so the
        // in-memory pool is pinned to one long-lived connection.
        let pool_options = if database_url.starts_with(MEMORY_DATABASE_URL) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply storage migrations")?;
        Ok(Self { pool })
    }

    /// Waits for open connections to finish and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn read_value(&self, scope: &str, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM kv_entries WHERE scope = ? AND key = ?",
        )
        .bind(scope)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to read '{scope}/{key}'"))?;
        Ok(value)
    }

    pub async fn read_entry(&self, scope: &str, key: &str) -> Result<Option<StoredEntry>> {
        let row = sqlx::query(
            "SELECT scope, key, value, updated_at FROM kv_entries WHERE scope = ? AND key = ?",
        )
        .bind(scope)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to read '{scope}/{key}'"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let updated_at: String = row.try_get("updated_at")?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at)
            .with_context(|| format!("corrupt timestamp for '{scope}/{key}': {updated_at}"))?
            .with_timezone(&Utc);

        Ok(Some(StoredEntry {
            scope: row.try_get("scope")?,
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            updated_at,
        }))
    }

    /// Inserts or overwrites the value stored under `scope/key`.
    pub async fn write_value(&self, scope: &str, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (scope, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(scope, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(scope)
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write '{scope}/{key}'"))?;
        Ok(())
    }

    /// Returns whether an entry existed.
    pub async fn delete_value(&self, scope: &str, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv_entries WHERE scope = ? AND key = ?")
            .bind(scope)
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete '{scope}/{key}'"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_scope(&self, scope: &str) -> Result<Vec<(String, String)>> {
        let rows = sqlx::query("SELECT key, value FROM kv_entries WHERE scope = ? ORDER BY key")
            .bind(scope)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to list scope '{scope}'"))?;

        rows.into_iter()
            .map(|row| -> Result<(String, String)> {
                Ok((row.try_get("key")?, row.try_get("value")?))
            })
            .collect()
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with(MEMORY_DATABASE_URL) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
