//! File-system access used by the post store

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// The file-system operations the post store depends on
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists and is a directory
    async fn dir_exists(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path`, in no particular order
    async fn list_dirs(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Whether `path` exists and is a file
    async fn file_exists(&self, path: &Path) -> bool;

    /// Read the whole file as UTF-8
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The local disk, via `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn dir_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    async fn list_dirs(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut dirs = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            // Follow symlinks
            match tokio::fs::metadata(&entry_path).await {
                Ok(meta) if meta.is_dir() => dirs.push(entry_path),
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping {:?}: {}", entry_path, e),
            }
        }

        Ok(dirs)
    }

    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}
