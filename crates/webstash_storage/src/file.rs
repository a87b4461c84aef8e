//! File-backed durable key/value store.

use crate::backend::{non_empty, StorageAdapter};
use crate::error::{StorageError, StorageResult};
use crate::kind::BackendKind;
use fs2::FileExt;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A durable key/value store persisted to a single file.
///
/// This is the native counterpart of the browser's durable store: entries
/// survive process restarts. The file holds a CBOR-encoded map of
/// string keys to string values.
///
/// # Concurrency
///
/// Every operation takes an advisory lock on a sibling `.lock` file
/// (shared for reads, exclusive for writes) and re-reads the map from disk,
/// so several processes can share one store. Writes go to a temporary file
/// that is renamed over the data file.
///
/// # Example
///
/// ```no_run
/// use webstash_storage::{FileStore, StorageAdapter};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("stash.cbor")).unwrap();
/// store.set("user", "alice").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Opens or creates a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing file cannot be read or decoded.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let store = Self {
            path: path.to_path_buf(),
            lock_path: sibling(path, "lock"),
            guard: Mutex::new(()),
        };
        // Surface corruption at open time rather than on first read.
        store.load()?;
        Ok(store)
    }

    /// Opens or creates a store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the store
    /// cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a snapshot of all entries on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn entries(&self) -> StorageResult<BTreeMap<String, String>> {
        let _guard = self.guard.lock();
        let lock = self.lock_file()?;
        FileExt::lock_shared(&lock).map_err(|e| StorageError::Lock(e.to_string()))?;
        self.load()
    }

    fn lock_file(&self) -> StorageResult<File> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(file)
    }

    fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if file.metadata()?.len() == 0 {
            return Ok(BTreeMap::new());
        }
        ciborium::from_reader(BufReader::new(file))
            .map_err(|e| StorageError::Corrupted(format!("{}: {e}", self.path.display())))
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let tmp_path = sibling(&self.path, "tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            ciborium::into_writer(entries, &mut writer)
                .map_err(|e| StorageError::write_failed(BackendKind::Durable, e.to_string()))?;
            writer.flush()?;
            writer
                .into_inner()
                .map_err(|e| StorageError::Io(e.into_error()))?
                .sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        tracing::trace!(path = %self.path.display(), entries = entries.len(), "persisted store");
        Ok(())
    }

    /// Runs `f` on the on-disk map under an exclusive lock and writes the
    /// result back if `f` reports a change.
    fn modify<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> (bool, T),
    ) -> StorageResult<T> {
        let _guard = self.guard.lock();
        let lock = self.lock_file()?;
        FileExt::lock_exclusive(&lock).map_err(|e| StorageError::Lock(e.to_string()))?;
        let mut entries = self.load()?;
        let (changed, out) = f(&mut entries);
        if changed {
            self.persist(&entries)?;
        }
        Ok(out)
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

impl StorageAdapter for FileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Durable
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut entries = self.entries()?;
        Ok(non_empty(entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            (true, ())
        })
    }

    fn set_if_absent(&self, key: &str, value: &str) -> StorageResult<String> {
        self.modify(|entries| match entries.get(key) {
            Some(existing) if !existing.is_empty() => (false, existing.clone()),
            _ => {
                entries.insert(key.to_string(), value.to_string());
                (true, value.to_string())
            }
        })
    }
}
