use async_trait::async_trait;
use serde_json::Value;
use sg_core::error::Result;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Directory and file operations the adapter consumes.
///
/// Methods return raw `io::Result` so callers can tell a missing entry
/// apart from any other failure.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create `path` and any missing ancestors.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Read a whole file.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Create or replace a file with `data`.
    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
    async fn remove_file(&self, path: &Path) -> io::Result<()>;
    /// Names of the entries of a directory, in no particular order and
    /// exactly as the OS reports them.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;
    /// Remove a directory and everything below it.
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Data adapter contract consumed by higher-level callers.
///
/// Items are grouped by `type` and addressed by a `/`-separated key.
/// Missing keys and namespaces are not errors.
#[async_trait]
pub trait DataAdapter: Send + Sync {
    async fn set(&self, type_name: &str, key: &str, value: &Value) -> Result<()>;
    async fn get(&self, type_name: &str, key: &str) -> Result<Option<Value>>;
    async fn keys(&self, type_name: &str) -> Result<Vec<String>>;
    async fn all(&self, type_name: &str) -> Result<BTreeMap<String, Value>>;
    async fn remove(&self, type_name: &str, key: &str) -> Result<()>;
    async fn clear(&self, type_name: &str) -> Result<()>;
}
