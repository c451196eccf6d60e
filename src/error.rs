use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by key resolution and the decryption batch.
///
/// `InvalidKey` and `NotInitialized` abort the whole run; the remaining
/// variants are recorded per file and never cross the batch boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// An embedded 1.0.0 key was found in `js/main.js` but its fingerprint
    /// did not verify. Hard stop, not a fallback.
    #[error("embedded decryption key failed verification (sha-256 {found})")]
    InvalidKey { found: String },

    /// Decryption was invoked before a key was resolved.
    #[error("decryption key has not been resolved")]
    NotInitialized,

    /// The ciphertext source is shorter than the 16 byte iv header.
    #[error("{}: shorter than the 16 byte iv header", path.display())]
    MalformedFile { path: PathBuf },

    /// The file's suffix is not part of the encrypted asset set, so no
    /// destination path can be derived for it.
    #[error("{}: unrecognized encrypted suffix", path.display())]
    UnrecognizedExtension { path: PathBuf },

    /// The cipher rejected the key or iv.
    #[error("cipher error: {0}")]
    Cipher(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
