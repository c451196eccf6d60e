//! Encrypted asset naming: the suffix set, backup siblings and the
//! engine-native remap table.

use std::path::{Path, PathBuf};

/// Version-specific suffixes that all mark the same logical encrypted
/// asset type.
pub const ENCRYPTED_EXTENSIONS: [&str; 5] = ["OMORI", "AUBREY", "PLUTO", "HERO", "KEL"];

/// Suffix of the sibling holding pristine ciphertext after an in-place
/// write.
pub const BACKUP_EXTENSION: &str = "BASIL";

/// Engine-native counterpart for an encrypted suffix.
pub fn native_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "OMORI" => Some("json"),
        "KEL" => Some("png"),
        "AUBREY" => Some("ogg"),
        "HERO" => Some("m4a"),
        "PLUTO" => Some("wav"),
        _ => None,
    }
}

/// Destination path for a decrypted asset, `None` when the suffix is not
/// part of the encrypted set.
pub fn native_path(path: &Path) -> Option<PathBuf> {
    let ext = path.extension()?.to_str()?;
    Some(path.with_extension(native_extension(ext)?))
}

/// The `.BASIL` sibling that, when present, is the authoritative ciphertext
/// source for `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}
