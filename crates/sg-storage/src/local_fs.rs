//! Local disk implementation of [`FileSystem`] on top of `tokio::fs`.

use crate::traits::FileSystem;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tokio::fs;

/// Non-blocking access to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        let mut rd = fs::read_dir(path).await?;
        while let Some(entry) = rd.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.json");
        LocalFs.write(&path, b"hello").await.unwrap();
        assert_eq!(LocalFs.read(&path).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ow.json");
        LocalFs.write(&path, b"first, longer").await.unwrap();
        LocalFs.write(&path, b"second").await.unwrap();
        assert_eq!(LocalFs.read(&path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_create_dir_all_nested_and_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");
        LocalFs.create_dir_all(&dir).await.unwrap();
        LocalFs.create_dir_all(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_read_dir() {
        let tmp = TempDir::new().unwrap();
        LocalFs.write(&tmp.path().join("x.json"), b"1").await.unwrap();
        LocalFs.write(&tmp.path().join("y.json"), b"2").await.unwrap();
        let mut names = LocalFs.read_dir(tmp.path()).await.unwrap();
        names.sort();
        assert_eq!(
            names,
            vec![OsString::from("x.json"), OsString::from("y.json")]
        );
    }

    #[tokio::test]
    async fn test_missing_entries_report_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let kind = |r: io::Result<()>| r.unwrap_err().kind();
        assert_eq!(
            LocalFs.read(&missing).await.unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert_eq!(
            LocalFs.read_dir(&missing).await.unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
        assert_eq!(kind(LocalFs.remove_file(&missing).await), io::ErrorKind::NotFound);
        assert_eq!(kind(LocalFs.remove_dir_all(&missing).await), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_remove_dir_all() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("ns");
        LocalFs.create_dir_all(&dir).await.unwrap();
        LocalFs.write(&dir.join("k.json"), b"{}").await.unwrap();
        LocalFs.remove_dir_all(&dir).await.unwrap();
        assert!(!dir.exists());
    }
}
