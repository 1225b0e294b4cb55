//! File-backed storage: one JSON document per key inside a data directory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{KeyValueStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!(".{key}.{}.tmp", std::process::id()))
    }
}

/// Keys become file names, so only a conservative alphabet is allowed.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |path: &Path, e: std::io::Error| StorageError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        fs::create_dir_all(&self.dir).map_err(|e| write_err(&self.dir, e))?;

        // Write the full document next to the target, then swap it in.
        let tmp = self.temp_path_for(key);
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)
            .map_err(|e| write_err(&tmp, e))?;
        file.lock_exclusive().map_err(|e| write_err(&tmp, e))?;

        let written = file
            .write_all(value.as_bytes())
            .and_then(|_| file.sync_all());
        let _ = FileExt::unlock(&file);
        drop(file);

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(&tmp, e));
        }

        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            write_err(&path, e)
        })?;

        tracing::trace!(key, path = %path.display(), bytes = value.len(), "State written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write { path, source: e }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn get_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.get("knitting-projects").unwrap().is_none());
    }

    #[test]
    fn set_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));
        storage.set("knitting-favorites", "{}").unwrap();

        let path = storage.path_for("knitting-favorites").unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }

    #[test]
    fn set_replaces_previous_value_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("key", "first").unwrap();
        storage.set("key", "second").unwrap();

        assert_eq!(storage.get("key").unwrap().as_deref(), Some("second"));
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["key.json".to_string()]);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("key", "value").unwrap();
        storage.remove("key").unwrap();
        storage.remove("key").unwrap();
        assert!(storage.get("key").unwrap().is_none());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
        assert!(matches!(
            storage.get(""),
            Err(StorageError::InvalidKey { .. })
        ));
    }
}
