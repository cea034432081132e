//! LMDB-backed key-value store.

use std::path::Path;

use heed::{Database, Env, EnvOpenOptions, types::Str};

use crate::{KvStore, StoreResult};

/// LMDB database holding world-scoped string values.
pub struct LmdbStore {
    env: Env,
    db: Database<Str, Str>,
}

impl LmdbStore {
    /// Open or create a store at the given directory.
    ///
    /// # Errors
    /// Returns an error if the directory or database cannot be created.
    ///
    /// # Safety
    /// Uses unsafe to call heed's open method which requires ensuring
    /// the database is not opened multiple times with different options.
    #[allow(unsafe_code)]
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;

        // SAFETY: one store per world directory, opened once at startup
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(64 * 1024 * 1024)
                .max_dbs(1)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let db = env.create_database(&mut wtxn, Some("world"))?;
        wtxn.commit()?;

        tracing::debug!("Opened claim store at {}", path.display());
        Ok(Self { env, db })
    }
}

impl KvStore for LmdbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let rtxn = self.env.read_txn()?;
        let value = self.db.get(&rtxn, key)?.map(str::to_string);
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut wtxn = self.env.write_txn()?;
        self.db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;

        tracing::trace!("Persisted {} bytes under {key}", value.len());
        Ok(())
    }
}
