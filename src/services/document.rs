//! Whole-document JSON persistence shared by every store.
//!
//! A [`JsonDocument`] owns one file. Reads load the whole document; updates
//! run load → mutate → write under a mutex shared by all clones, and the
//! write replaces the file atomically (temp file in the same directory,
//! fsync, rename). If serialization or any filesystem step fails, the
//! previous file stays in place.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;

use crate::errors::{StoreError, StoreResult};

type Seed<T> = dyn Fn() -> StoreResult<T> + Send + Sync;

pub struct JsonDocument<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    seed: Arc<Seed<T>>,
}

impl<T> Clone for JsonDocument<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: self.lock.clone(),
            seed: self.seed.clone(),
        }
    }
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + PartialEq + Clone,
{
    /// `seed` builds the initial document whenever the file does not exist.
    pub fn new(
        path: impl Into<PathBuf>,
        seed: impl Fn() -> StoreResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
            seed: Arc::new(seed),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file from the seed if it is missing.
    pub fn ensure(&self) -> StoreResult<()> {
        let _guard = self.guard();
        self.load().map(|_| ())
    }

    pub fn read(&self) -> StoreResult<T> {
        let _guard = self.guard();
        self.load()
    }

    /// Applies `mutate` to a fresh copy of the document and writes it back
    /// if it changed. An error from `mutate` leaves the file untouched.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> StoreResult<R>) -> StoreResult<R> {
        let _guard = self.guard();
        let current = self.load()?;
        let mut next = current.clone();
        let result = mutate(&mut next)?;
        if next != current {
            self.write(&next)?;
        } else {
            tracing::debug!("No changes to {}, skipping write", self.path.display());
        }
        Ok(result)
    }

    // The guarded value is (), so a poisoned lock carries no broken state.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> StoreResult<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Document {} not found, creating it", self.path.display());
                let seeded = (self.seed)()?;
                self.write(&seeded)?;
                return Ok(seeded);
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.path.display(), e);
                return Err(StoreError::File(e));
            }
        };

        serde_json::from_str(&raw).map_err(|source| {
            tracing::error!("Failed to parse {}: {}", self.path.display(), source);
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn write(&self, document: &T) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let persist = || -> StoreResult<()> {
            fs::create_dir_all(dir)?;
            let mut temp = NamedTempFile::new_in(dir)?;
            temp.write_all(&encode(document)?)?;
            temp.as_file().sync_all()?;
            temp.persist(&self.path).map_err(|e| StoreError::File(e.error))?;
            Ok(())
        };

        persist().map_err(|e| {
            tracing::error!("Failed to write {}: {}", self.path.display(), e);
            e
        })?;
        tracing::debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Pretty JSON with 4-space indentation and a trailing newline.
pub fn encode<T: Serialize>(document: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document
        .serialize(&mut serializer)
        .map_err(|e| StoreError::File(e.into()))?;
    buf.push(b'\n');
    Ok(buf)
}
