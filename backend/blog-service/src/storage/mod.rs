//! File storage collaborator
//!
//! The service never handles stored bytes beyond handing them to a
//! `FileStore`; only the returned reference URL is persisted.

use async_trait::async_trait;
use std::path::PathBuf;

/// External byte-storage collaborator for media uploads
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store the file content and return its public reference URL
    async fn store(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<String>;
}

/// Disk-backed file store
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes).await?;

        Ok(format!("/uploads/{}", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn stores_bytes_and_returns_reference_url() {
        let dir = std::env::temp_dir().join(format!("blog-store-{}", Uuid::new_v4()));
        let store = DiskFileStore::new(&dir);

        let url = store.store("picture.png", b"bytes").await.unwrap();
        assert_eq!(url, "/uploads/picture.png");

        let written = tokio::fs::read(dir.join("picture.png")).await.unwrap();
        assert_eq!(written, b"bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
