//! Sitegear core: store configuration, text encodings and the error type
//! shared by the storage adapters.

pub mod config;
pub mod encoding;
pub mod error;

pub use config::{StoreConfig, StoreOverrides};
pub use encoding::TextEncoding;
pub use error::{Result, SgError};
