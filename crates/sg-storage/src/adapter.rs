//! Filesystem key-value adapter.
//!
//! Layout on disk is `<root>/<type>/<encoded key><extension>`. Namespace
//! directories are created on first write. Missing keys and namespaces read
//! as absent rather than as errors.

use crate::key_codec::{decode_key, encode_key, has_extension, is_ambiguous};
use crate::local_fs::LocalFs;
use crate::traits::{DataAdapter, FileSystem};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sg_core::config::StoreConfig;
use sg_core::encoding::TextEncoding;
use sg_core::error::{Result, SgError};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Key-value store mapping each type to a directory and each key to a file.
pub struct FsAdapter<F: FileSystem = LocalFs> {
    config: StoreConfig,
    fs: Arc<F>,
}

impl FsAdapter<LocalFs> {
    /// Adapter over the local disk.
    pub fn new(config: StoreConfig) -> Result<Self> {
        Self::with_filesystem(config, LocalFs)
    }
}

impl<F: FileSystem + 'static> FsAdapter<F> {
    /// Adapter over an arbitrary [`FileSystem`].
    pub fn with_filesystem(config: StoreConfig, fs: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fs: Arc::new(fs),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Directory holding every item of `type_name`.
    ///
    /// Always a subdirectory of the root: leading `/` and `.` components are
    /// dropped, while `..`, drive prefixes and names that reduce to the root
    /// itself are rejected.
    pub fn type_dir(&self, type_name: &str) -> Result<PathBuf> {
        let mut dir = self.config.root.clone();
        let mut depth = 0;
        for component in Path::new(type_name).components() {
            match component {
                Component::Normal(part) => {
                    dir.push(part);
                    depth += 1;
                }
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(SgError::Config(format!(
                        "type name escapes the store root: {type_name:?}"
                    )));
                }
            }
        }
        if depth == 0 {
            return Err(SgError::Config(format!(
                "type name does not name a namespace: {type_name:?}"
            )));
        }
        Ok(dir)
    }

    /// File holding `key` within `type_name`.
    pub fn key_path(&self, type_name: &str, key: &str) -> Result<PathBuf> {
        Ok(self
            .type_dir(type_name)?
            .join(encode_key(key, &self.config.extension)))
    }

    /// Store `value`, replacing any previous content for the key.
    ///
    /// Strings are written verbatim; everything else as tab-indented JSON.
    pub async fn set(&self, type_name: &str, key: &str, value: &Value) -> Result<()> {
        let path = self.key_path(type_name, key)?;
        if is_ambiguous(key) {
            warn!(
                type_name,
                key, "key contains the separator sequence and will not decode back to itself"
            );
        }
        let text = match value {
            Value::String(s) => s.clone(),
            other => to_pretty_json(other)?,
        };
        let bytes = self.config.encoding.encode(&text)?;

        if let Some(dir) = path.parent() {
            self.fs
                .create_dir_all(dir)
                .await
                .map_err(|e| SgError::io("mkdir", dir, e))?;
        }
        self.fs
            .write(&path, &bytes)
            .await
            .map_err(|e| SgError::io("write", &path, e))?;
        debug!(type_name, key, bytes = bytes.len(), "set");
        Ok(())
    }

    /// Serialize `value` and store it.
    pub async fn set_as<T: Serialize + ?Sized>(
        &self,
        type_name: &str,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(type_name, key, &value).await
    }

    /// Parsed content for the key, `None` when nothing is stored.
    pub async fn get(&self, type_name: &str, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(type_name, key)?;
        let bytes = match self.fs.read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(type_name, key, "get: absent");
                return Ok(None);
            }
            Err(e) => return Err(SgError::io("read", &path, e)),
        };
        let value = parse_content(self.config.encoding, &bytes)?;
        debug!(type_name, key, "get");
        Ok(Some(value))
    }

    /// Like [`get`](Self::get), deserialized into `T`.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        type_name: &str,
        key: &str,
    ) -> Result<Option<T>> {
        match self.get(type_name, key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Decoded keys of every entry in the namespace, sorted.
    pub async fn keys(&self, type_name: &str) -> Result<Vec<String>> {
        let dir = self.type_dir(type_name)?;
        let names = match self.fs.read_dir(&dir).await {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(type_name, "keys: namespace absent");
                return Ok(Vec::new());
            }
            Err(e) => return Err(SgError::io("readdir", &dir, e)),
        };
        let mut keys: Vec<String> = utf8_names(&dir, names)
            .iter()
            .map(|name| decode_key(name, &self.config.extension))
            .collect();
        keys.sort();
        debug!(type_name, count = keys.len(), "keys");
        Ok(keys)
    }

    /// Every item of the namespace, keyed by decoded key.
    ///
    /// Files are read concurrently. The first failing read decides the
    /// outcome and the reads still in flight are aborted.
    pub async fn all(&self, type_name: &str) -> Result<BTreeMap<String, Value>> {
        let dir = self.type_dir(type_name)?;
        let names = self
            .fs
            .read_dir(&dir)
            .await
            .map_err(|e| SgError::io("readdir", &dir, e))?;

        let mut reads = JoinSet::new();
        for name in utf8_names(&dir, names)
            .into_iter()
            .filter(|name| has_extension(name, &self.config.extension))
        {
            let fs = Arc::clone(&self.fs);
            let path = dir.join(&name);
            let encoding = self.config.encoding;
            reads.spawn(async move {
                let bytes = fs
                    .read(&path)
                    .await
                    .map_err(|e| SgError::io("read", &path, e))?;
                let value = parse_content(encoding, &bytes)?;
                Ok::<_, SgError>((name, value))
            });
        }

        let mut items = BTreeMap::new();
        while let Some(joined) = reads.join_next().await {
            let (name, value) = joined.map_err(|e| SgError::Join(e.to_string()))??;
            items.insert(decode_key(&name, &self.config.extension), value);
        }
        debug!(type_name, count = items.len(), "all");
        Ok(items)
    }

    /// Delete the key. Deleting an absent key succeeds.
    pub async fn remove(&self, type_name: &str, key: &str) -> Result<()> {
        let path = self.key_path(type_name, key)?;
        match self.fs.remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SgError::io("unlink", &path, e)),
        }
        debug!(type_name, key, "remove");
        Ok(())
    }

    /// Delete the namespace directory and everything in it.
    pub async fn clear(&self, type_name: &str) -> Result<()> {
        let dir = self.type_dir(type_name)?;
        match self.fs.remove_dir_all(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SgError::io("rmdir", &dir, e)),
        }
        debug!(type_name, "clear");
        Ok(())
    }
}

#[async_trait]
impl<F: FileSystem + 'static> DataAdapter for FsAdapter<F> {
    async fn set(&self, type_name: &str, key: &str, value: &Value) -> Result<()> {
        FsAdapter::set(self, type_name, key, value).await
    }

    async fn get(&self, type_name: &str, key: &str) -> Result<Option<Value>> {
        FsAdapter::get(self, type_name, key).await
    }

    async fn keys(&self, type_name: &str) -> Result<Vec<String>> {
        FsAdapter::keys(self, type_name).await
    }

    async fn all(&self, type_name: &str) -> Result<BTreeMap<String, Value>> {
        FsAdapter::all(self, type_name).await
    }

    async fn remove(&self, type_name: &str, key: &str) -> Result<()> {
        FsAdapter::remove(self, type_name, key).await
    }

    async fn clear(&self, type_name: &str) -> Result<()> {
        FsAdapter::clear(self, type_name).await
    }
}

/// Keys are `&str`, so entries whose names are not UTF-8 were not written by
/// the adapter and are skipped.
fn utf8_names(dir: &Path, names: Vec<OsString>) -> Vec<String> {
    names
        .into_iter()
        .filter_map(|name| match name.into_string() {
            Ok(name) => Some(name),
            Err(raw) => {
                warn!(path = %dir.join(&raw).display(), "skipping entry with a non-utf8 name");
                None
            }
        })
        .collect()
}

fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| SgError::Encoding(e.to_string()))
}

fn parse_content(encoding: TextEncoding, bytes: &[u8]) -> Result<Value> {
    let text = encoding.decode(bytes)?;
    Ok(serde_json::from_str(&text)?)
}
