use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

/// Blob store backed by a directory on the local disk.
///
/// Every write lands under a fresh `<uuid>.<ext>` name, first as a hidden
/// temporary sibling that is renamed into place once fully written.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn generate_stored_name(original_filename: &str) -> String {
        let id = Uuid::new_v4();
        match Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
        {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        data: &[u8],
        original_filename: &str,
    ) -> Result<StoredFile, FileStorageError> {
        self.ensure_directory_exists().await?;

        let stored_name = Self::generate_stored_name(original_filename);
        let file_path = self.base_path.join(&stored_name);
        let temp_path = self.base_path.join(format!(".{}.part", stored_name));

        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &file_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        let size = fs::metadata(&file_path).await?.len();

        Ok(StoredFile {
            stored_name,
            location: file_path.to_string_lossy().to_string(),
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_file_writes_bytes_and_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let stored = storage.store_file(b"hello world", "notes.TXT").await.unwrap();

        assert!(stored.stored_name.ends_with(".TXT"));
        assert_eq!(stored.size, 11);
        assert_eq!(fs::read(&stored.location).await.unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn test_same_name_twice_gets_distinct_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let first = storage.store_file(b"a", "report.pdf").await.unwrap();
        let second = storage.store_file(b"b", "report.pdf").await.unwrap();

        assert_ne!(first.stored_name, second.stored_name);
        assert_eq!(fs::read(&first.location).await.unwrap(), b"a");
        assert_eq!(fs::read(&second.location).await.unwrap(), b"b");
    }

    #[tokio::test]
    async fn test_name_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let stored = storage.store_file(b"", "Makefile").await.unwrap();

        assert!(!stored.stored_name.contains('.'));
        assert_eq!(stored.size, 0);
    }

    #[tokio::test]
    async fn test_no_temporary_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        storage.store_file(b"abc", "a.bin").await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names.len(), 1);
        assert!(!names[0].starts_with('.'));
    }

    #[tokio::test]
    async fn test_unusable_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let storage = LocalFileStorage::new(blocker);

        let result = storage.store_file(b"abc", "a.txt").await;

        assert!(result.is_err());
    }
}
