//! Mapping between hierarchical keys and on-disk filenames.
//!
//! `/` in a key becomes [`KEY_SEPARATOR`] and the configured extension is
//! appended. The substitution is not an escape: a key that already contains
//! the separator literally decodes to a different key.

/// Replacement for `/` inside an encoded key.
pub const KEY_SEPARATOR: &str = "___";

/// Filename for `key`.
pub fn encode_key(key: &str, extension: &str) -> String {
    format!("{}{extension}", key.replace('/', KEY_SEPARATOR))
}

/// Key for `filename`. The extension is stripped only when present.
pub fn decode_key(filename: &str, extension: &str) -> String {
    filename
        .strip_suffix(extension)
        .unwrap_or(filename)
        .replace(KEY_SEPARATOR, "/")
}

/// Whether `filename` carries the store extension.
pub fn has_extension(filename: &str, extension: &str) -> bool {
    filename.ends_with(extension)
}

/// Keys containing the separator literally do not survive a round trip.
pub fn is_ambiguous(key: &str) -> bool {
    key.contains(KEY_SEPARATOR)
}
