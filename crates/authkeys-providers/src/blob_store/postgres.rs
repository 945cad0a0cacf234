//! PostgreSQL blob store
//!
//! Shared store backed by a single table keyed by blob name:
//!
//! ```sql
//! CREATE TABLE authkeys_blobs (
//!     name       TEXT PRIMARY KEY,
//!     blob       BYTEA NOT NULL,
//!     expires_at BIGINT NOT NULL  -- unix millis
//! );
//! ```
//!
//! An NX-write is a single `INSERT … ON CONFLICT DO UPDATE … WHERE` that only
//! overwrites an expired row, so the primary key decides every race and an
//! expired row can be reclaimed in the same statement. Reads ignore expired
//! rows.
//!
//! The `postgres` client is synchronous; every call runs on tokio's blocking
//! pool.

use crate::constants::{
    POSTGRES_BLOB_TABLE, POSTGRES_CONNECTION_TIMEOUT, POSTGRES_DEFAULT_POOL_SIZE,
};
use async_trait::async_trait;
use authkeys_domain::error::{Error, Result};
use authkeys_domain::ports::providers::BlobStore;
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;
use r2d2_postgres::postgres::{Client, Config, NoTls};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type PgPool = Pool<PostgresConnectionManager<NoTls>>;

/// PostgreSQL blob store provider
#[derive(Clone)]
pub struct PostgresBlobStore {
    pool: PgPool,
    namespace: Option<String>,
    schema_ready: Arc<AtomicBool>,
}

impl PostgresBlobStore {
    /// Create a store for `url` with a pool of `pool_size` connections
    ///
    /// Connections are opened lazily; the table is created on first use.
    pub fn new(url: &str, pool_size: u32) -> Result<Self> {
        let config = url
            .parse::<Config>()
            .map_err(|e| Error::storage_with_source("Invalid PostgreSQL URL", e))?;
        let manager = PostgresConnectionManager::new(config, NoTls);

        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .min_idle(Some(0))
            .connection_timeout(POSTGRES_CONNECTION_TIMEOUT)
            .build_unchecked(manager);

        Ok(Self {
            pool,
            namespace: None,
            schema_ready: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Prefix every blob name with `namespace:`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    fn key(&self, name: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{name}"),
            None => name.to_string(),
        }
    }

    /// Run `op` with a pooled connection on the blocking pool
    async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Client) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let schema_ready = Arc::clone(&self.schema_ready);

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::storage_with_source("Failed to get PostgreSQL connection", e))?;

            if !schema_ready.load(Ordering::Acquire) {
                conn.batch_execute(&create_table_sql())
                    .map_err(|e| Error::storage_with_source("Failed to create blob table", e))?;
                schema_ready.store(true, Ordering::Release);
            }

            op(&mut conn)
        })
        .await
        .map_err(|e| Error::internal(format!("PostgreSQL task failed: {e}")))?
    }
}

fn create_table_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {POSTGRES_BLOB_TABLE} (
            name TEXT PRIMARY KEY,
            blob BYTEA NOT NULL,
            expires_at BIGINT NOT NULL
        )"
    )
}

fn unix_millis(at: SystemTime) -> i64 {
    let since_epoch = at.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
    i64::try_from(since_epoch.as_millis()).unwrap_or(i64::MAX)
}

/// Current time and expiry for `ttl`, both in unix millis
fn now_and_expiry(ttl: Duration) -> (i64, i64) {
    let now = SystemTime::now();
    let expires_at = now.checked_add(ttl).map_or(i64::MAX, unix_millis);
    (unix_millis(now), expires_at)
}

#[async_trait]
impl BlobStore for PostgresBlobStore {
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let key = self.key(name);
        self.with_connection(move |client| {
            let (now, _) = now_and_expiry(Duration::ZERO);
            let row = client
                .query_opt(
                    &format!(
                        "SELECT blob FROM {POSTGRES_BLOB_TABLE} WHERE name = $1 AND expires_at > $2"
                    ),
                    &[&key, &now],
                )
                .map_err(|e| Error::storage_with_source("PostgreSQL read failed", e))?;

            row.map(|row| row.try_get::<_, Vec<u8>>(0))
                .transpose()
                .map_err(|e| Error::storage_with_source("PostgreSQL returned a malformed row", e))
        })
        .await
    }

    async fn write_nx(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<bool> {
        let key = self.key(name);
        let blob = blob.to_vec();
        self.with_connection(move |client| {
            let (now, expires_at) = now_and_expiry(ttl);
            let inserted = client
                .execute(
                    &format!(
                        "INSERT INTO {POSTGRES_BLOB_TABLE} (name, blob, expires_at)
                         VALUES ($1, $2, $3)
                         ON CONFLICT (name) DO UPDATE
                         SET blob = EXCLUDED.blob, expires_at = EXCLUDED.expires_at
                         WHERE {POSTGRES_BLOB_TABLE}.expires_at <= $4"
                    ),
                    &[&key, &blob, &expires_at, &now],
                )
                .map_err(|e| Error::storage_with_source("PostgreSQL NX-write failed", e))?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn write(&self, name: &str, blob: &[u8], ttl: Duration) -> Result<()> {
        let key = self.key(name);
        let blob = blob.to_vec();
        self.with_connection(move |client| {
            let (_, expires_at) = now_and_expiry(ttl);
            client
                .execute(
                    &format!(
                        "INSERT INTO {POSTGRES_BLOB_TABLE} (name, blob, expires_at)
                         VALUES ($1, $2, $3)
                         ON CONFLICT (name) DO UPDATE
                         SET blob = EXCLUDED.blob, expires_at = EXCLUDED.expires_at"
                    ),
                    &[&key, &blob, &expires_at],
                )
                .map_err(|e| Error::storage_with_source("PostgreSQL write failed", e))?;
            Ok(())
        })
        .await
    }

    fn provider_name(&self) -> &str {
        "postgres"
    }
}

impl std::fmt::Debug for PostgresBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("PostgresBlobStore")
            .field("namespace", &self.namespace)
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use authkeys_application::ports::registry::{
    BLOB_STORE_PROVIDERS, BlobStoreProviderConfig, BlobStoreProviderEntry,
};

#[linkme::distributed_slice(BLOB_STORE_PROVIDERS)]
static POSTGRES_PROVIDER: BlobStoreProviderEntry = BlobStoreProviderEntry {
    name: "postgres",
    description: "PostgreSQL shared blob store (INSERT ... ON CONFLICT)",
    factory: |config: &BlobStoreProviderConfig| {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| "PostgreSQL blob store requires a uri".to_string())?;
        let pool_size = config.pool_size.unwrap_or(POSTGRES_DEFAULT_POOL_SIZE);
        let mut store = PostgresBlobStore::new(uri, pool_size).map_err(|e| e.to_string())?;
        if let Some(namespace) = &config.namespace {
            store = store.with_namespace(namespace.clone());
        }
        Ok(Arc::new(store))
    },
};
