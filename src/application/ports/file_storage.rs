use async_trait::async_trait;

#[derive(Debug)]
pub enum FileStorageError {
    PermissionDenied(String),
    StorageFull,
    IoError(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            FileStorageError::StorageFull => write!(f, "Storage full"),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FileStorageError {}

impl From<std::io::Error> for FileStorageError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                FileStorageError::PermissionDenied(error.to_string())
            }
            std::io::ErrorKind::StorageFull => FileStorageError::StorageFull,
            _ => FileStorageError::IoError(error.to_string()),
        }
    }
}

/// Where a blob ended up after a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Generated key, unique per write, keeping the original extension.
    pub stored_name: String,
    pub location: String,
    pub size: u64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes all of `data` under a freshly generated name. Either the whole
    /// file is in place when this returns `Ok`, or nothing is.
    async fn store_file(
        &self,
        data: &[u8],
        original_filename: &str,
    ) -> Result<StoredFile, FileStorageError>;
}
