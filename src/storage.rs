//! Storage Module
//!
//! Resolves snapshot file paths and performs atomic reads and writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::serializer::Payload;

// == File Manager ==
/// Resolves storage paths and moves payloads to and from disk.
///
/// Writes go through a temporary file in the target directory followed by a
/// rename, so an existing file is either fully replaced or left intact: a
/// partial write never clobbers the previous snapshot.
#[derive(Debug, Clone)]
pub struct FileManager {
    /// Directory used when the caller gives no path
    default_dir: PathBuf,
    /// Base filename used when the caller gives no path or a bare directory
    default_filename: String,
}

impl FileManager {
    // == Constructor ==
    /// Creates a FileManager with defaults for one kind of artifact,
    /// e.g. `FileManager::new("snapshots", "cache")`.
    pub fn new(default_dir: impl Into<PathBuf>, default_filename: impl Into<String>) -> Self {
        Self {
            default_dir: default_dir.into(),
            default_filename: default_filename.into(),
        }
    }

    // == Resolve Path ==
    /// Computes the final file path from an optional caller-supplied path.
    ///
    /// - No path: `default_dir/default_filename[.timestamp].extension`
    /// - Existing directory: default filename inside that directory
    /// - Anything else: treated as a file path whose extension is forced to
    ///   the serializer's
    ///
    /// The timestamp suffix is UTC `%Y%m%d_%H%M%S`, filesystem-safe at
    /// seconds resolution. The target directory is created if missing.
    pub fn resolve_path(
        &self,
        explicit: Option<&Path>,
        extension: &str,
        use_timestamp: bool,
    ) -> Result<PathBuf> {
        let (target_dir, base_name) = match explicit {
            None => (self.default_dir.clone(), self.default_filename.clone()),
            Some(path) if path.is_dir() => (path.to_path_buf(), self.default_filename.clone()),
            Some(path) => {
                let dir = match path.parent() {
                    Some(parent) if parent != Path::new("") => parent.to_path_buf(),
                    _ => self.default_dir.clone(),
                };
                let base = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| self.default_filename.clone());
                (dir, base)
            }
        };

        let base_name = if use_timestamp {
            format!("{base_name}_{}", Utc::now().format("%Y%m%d_%H%M%S"))
        } else {
            base_name
        };

        fs::create_dir_all(&target_dir).map_err(|e| CacheError::persistence(&target_dir, e))?;

        Ok(target_dir.join(format!("{base_name}.{extension}")))
    }

    // == Write ==
    /// Writes the payload to `path`, atomically replacing any existing file.
    pub fn write(&self, path: &Path, payload: &Payload) -> Result<()> {
        let dir = path.parent().filter(|p| *p != Path::new(""));
        let mut temp = NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
            .map_err(|e| CacheError::persistence(path, e))?;
        temp.write_all(payload.as_bytes())
            .map_err(|e| CacheError::persistence(path, e))?;
        temp.persist(path)
            .map_err(|e| CacheError::persistence(path, e.error))?;

        debug!(path = %path.display(), bytes = payload.len(), "wrote snapshot file");
        Ok(())
    }

    // == Read ==
    /// Reads a payload back, as raw bytes or UTF-8 text per `binary`.
    pub fn read(&self, path: &Path, binary: bool) -> Result<Payload> {
        let bytes = fs::read(path).map_err(|e| CacheError::persistence(path, e))?;
        if binary {
            Ok(Payload::Binary(bytes))
        } else {
            String::from_utf8(bytes)
                .map(Payload::Text)
                .map_err(|e| CacheError::persistence(path, e))
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");

        let path = manager.resolve_path(None, "json", false).unwrap();
        assert_eq!(path, dir.path().join("cache.json"));
    }

    #[test]
    fn test_resolve_path_forces_extension() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");

        let explicit = dir.path().join("backup.txt");
        let path = manager
            .resolve_path(Some(&explicit), "bin", false)
            .unwrap();
        assert_eq!(path, dir.path().join("backup.bin"));
    }

    #[test]
    fn test_resolve_path_bare_directory_uses_default_filename() {
        let defaults = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let manager = FileManager::new(defaults.path(), "cache");

        let path = manager
            .resolve_path(Some(target.path()), "json", false)
            .unwrap();
        assert_eq!(path, target.path().join("cache.json"));
    }

    #[test]
    fn test_resolve_path_timestamp_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");

        let path = manager.resolve_path(None, "json", true).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        // cache_YYYYMMDD_HHMMSS.json
        assert!(name.starts_with("cache_"));
        assert!(name.ends_with(".json"));
        let stamp = &name["cache_".len()..name.len() - ".json".len()];
        assert_eq!(stamp.len(), 15);
        assert!(stamp.chars().filter(|c| *c == '_').count() == 1);
    }

    #[test]
    fn test_resolve_path_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("nested");
        let manager = FileManager::new(&nested, "cache");

        let path = manager.resolve_path(None, "json", false).unwrap();
        assert!(nested.is_dir());
        assert_eq!(path, nested.join("cache.json"));
    }

    #[test]
    fn test_write_read_roundtrip_text() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");
        let path = dir.path().join("cache.json");

        manager
            .write(&path, &Payload::Text("{\"a\":1}".to_string()))
            .unwrap();
        let restored = manager.read(&path, false).unwrap();
        assert_eq!(restored, Payload::Text("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_write_read_roundtrip_binary() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");
        let path = dir.path().join("cache.bin");

        let bytes = vec![0u8, 255, 1, 254];
        manager.write(&path, &Payload::Binary(bytes.clone())).unwrap();
        let restored = manager.read(&path, true).unwrap();
        assert_eq!(restored, Payload::Binary(bytes));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");
        let path = dir.path().join("cache.json");

        manager.write(&path, &Payload::Text("old".to_string())).unwrap();
        manager.write(&path, &Payload::Text("new".to_string())).unwrap();

        assert_eq!(
            manager.read(&path, false).unwrap(),
            Payload::Text("new".to_string())
        );
        // No leftover temp files next to the target
        let siblings = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(siblings, 1);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::new(dir.path(), "cache");

        let result = manager.read(&dir.path().join("absent.json"), false);
        assert!(matches!(result, Err(CacheError::Persistence { .. })));
    }
}
