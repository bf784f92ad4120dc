//! File-based model store.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{LoadFailure, Result, SolaceError};
use crate::store::ModelStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores the artifact in a single file.
///
/// Saves write a sibling temporary file and rename it over the target, so
/// readers never observe a partially written artifact.
#[derive(Debug, Clone)]
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileModelStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "model".into());
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".tmp-{}-{seq}", std::process::id()));
        self.path.with_file_name(name)
    }

    /// Remove the artifact if it exists.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SolaceError::storage(format!(
                "Failed to delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

impl ModelStore for FileModelStore {
    fn read_bytes(&self) -> std::result::Result<Vec<u8>, LoadFailure> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadFailure::Missing,
            _ => LoadFailure::Unreadable(e),
        })
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SolaceError::storage(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let temp_path = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SolaceError::storage(format!("Failed to write {}: {e}", self.path.display()))
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::artifact::tests::sample_model;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileModelStore::new(temp_dir.path().join("model.slcm"));

        assert!(matches!(store.load(), Err(LoadFailure::Missing)));
    }

    #[test]
    fn test_save_load_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileModelStore::new(temp_dir.path().join("nested/dir/model.slcm"));
        let model = sample_model();

        store.save(&model).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), model);

        // No temporary file is left behind.
        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_overwrite_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileModelStore::new(temp_dir.path().join("model.slcm"));

        store.write_bytes(b"garbage").unwrap();
        assert!(matches!(store.load(), Err(LoadFailure::Corrupt(_))));

        store.save(&sample_model()).unwrap();
        assert!(store.load().is_ok());

        store.delete().unwrap();
        store.delete().unwrap();
        assert!(matches!(store.load(), Err(LoadFailure::Missing)));
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.slcm");
        let first = FileModelStore::new(&path);
        let second = FileModelStore::new(&path);

        let a = first.temp_path();
        let b = first.temp_path();
        let c = second.temp_path();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(a.parent(), path.parent());
    }

    #[test]
    fn test_concurrent_saves_to_same_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.slcm");
        let model = sample_model();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let store = FileModelStore::new(&path);
                let model = &model;
                scope.spawn(move || {
                    for _ in 0..5 {
                        store.save(model).unwrap();
                    }
                });
            }
        });

        assert_eq!(FileModelStore::new(&path).load().unwrap(), model);
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_directory_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileModelStore::new(temp_dir.path());

        assert!(matches!(store.read_bytes(), Err(LoadFailure::Unreadable(_))));
    }
}
