//! Bulk decryption of encrypted asset files.
//!
//! Every file is a 16 byte raw iv followed by AES-256-CTR ciphertext of the
//! original asset, keyed by the resolved key's utf-8 bytes. Files are
//! processed independently; one failure never aborts the batch.

use crate::{
    assets,
    error::{Error, Result},
    key::ResolvedKey,
    progress::ProgressSink,
};
use aes::Aes256;
use ctr::{
    Ctr128BE,
    cipher::{KeyIvInit, StreamCipher},
};
use log::warn;
use std::{
    fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

type Aes256Ctr = Ctr128BE<Aes256>;

/// Length of the raw initialization vector prefixed to every file.
pub const IV_LEN: usize = 16;

/// Immutable state shared by the whole decryption phase, built once after
/// key resolution.
pub struct DecryptContext {
    pub key: ResolvedKey,
    pub folder: PathBuf,
}

/// Outcome of a batch run. Every input file lands in exactly one of the two
/// lists.
#[derive(Debug, Default)]
pub struct DecryptReport {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, Error)>,
}

/// Decrypts `files` with the resolved key, folding per-file outcomes into a
/// [`DecryptReport`].
///
/// A missing context is the only whole-batch failure; it means decryption
/// was invoked before resolution.
pub fn decrypt_all(
    ctx: Option<&DecryptContext>,
    files: &[PathBuf],
    beautify: bool,
    progress: &mut dyn ProgressSink,
) -> Result<DecryptReport> {
    let ctx = ctx.ok_or(Error::NotInitialized)?;
    let total = files.len();
    let mut report = DecryptReport::default();

    for (index, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|x| x.to_string_lossy())
            .unwrap_or_else(|| file.to_string_lossy());
        progress.update("Decrypting", &name, index + 1, total);

        match decrypt_file(ctx, file, beautify) {
            Ok(dest) => report.succeeded.push(dest),
            Err(e) => {
                warn!("{}: {}", file.display(), e);
                report.failed.push((file.clone(), e));
            }
        }
    }

    Ok(report)
}

/// Decrypts one file and writes its plaintext to the remapped destination,
/// returning the destination path.
fn decrypt_file(ctx: &DecryptContext, file: &Path, beautify: bool) -> Result<PathBuf> {
    // A .BASIL sibling holds the pristine ciphertext after a prior in-place
    // write, so re-runs stay idempotent.
    let backup = assets::backup_path(file);
    let source = if backup.exists() { backup.as_path() } else { file };
    let bytes = fs::read(source)?;

    if bytes.len() < IV_LEN {
        return Err(Error::MalformedFile {
            path: source.to_path_buf(),
        });
    }

    let (iv, ciphertext) = bytes.split_at(IV_LEN);
    let mut plaintext = ciphertext.to_vec();

    Aes256Ctr::new_from_slices(ctx.key.as_bytes(), iv)
        .map_err(|e| Error::Cipher(e.to_string()))?
        .apply_keystream(&mut plaintext);

    let dest = assets::native_path(file).ok_or_else(|| Error::UnrecognizedExtension {
        path: file.to_path_buf(),
    })?;

    if beautify && dest.extension().and_then(|x| x.to_str()) == Some("json") {
        match beautify_json(&plaintext) {
            Ok(pretty) => plaintext = pretty,
            // Never fail the file over formatting; ship the raw bytes.
            Err(e) => warn!("Failed to beautify json: {e}"),
        }
    }

    let mut output = File::create(&dest)?;
    output.write_all(&plaintext)?;
    output.flush()?;

    Ok(dest)
}

/// Re-emits a decrypted json payload with stable indentation.
fn beautify_json(raw: &[u8]) -> serde_json::Result<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    serde_json::to_vec_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beautify_reindents_json() {
        let pretty = beautify_json(br#"{"b":2,"a":[1,2]}"#).unwrap();
        let text = String::from_utf8(pretty).unwrap();
        assert!(text.contains("\n  \"a\""));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).unwrap(),
            serde_json::json!({"a": [1, 2], "b": 2})
        );
    }

    #[test]
    fn beautify_rejects_binary_payloads() {
        assert!(beautify_json(&[0x89, b'P', b'N', b'G']).is_err());
        assert!(beautify_json(b"not json").is_err());
    }
}
