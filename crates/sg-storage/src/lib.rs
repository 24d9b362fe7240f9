//! Sitegear storage layer: filesystem-backed key-value adapter.

pub mod adapter;
pub mod key_codec;
pub mod local_fs;
pub mod traits;

pub use adapter::FsAdapter;
pub use key_codec::{decode_key, encode_key, KEY_SEPARATOR};
pub use local_fs::LocalFs;
pub use traits::{DataAdapter, FileSystem};
