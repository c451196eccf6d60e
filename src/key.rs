//! Decryption key discovery and verification.
//!
//! Two key regimes exist across OMORI releases, identified only by the
//! sha-256 fingerprint of whatever key the user supplies (often blank).
//! 1.0.0 embeds its key in `js/main.js`; later versions pass it through the
//! Steam launch options (see <https://steamdb.info/app/1150690/config>).
//! Resolution reconciles the supplied candidate, the embedded script
//! constant and a hardcoded default into exactly one verified key.

use crate::error::{Error, Result};
use log::{debug, info};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::{fs, path::Path, sync::LazyLock};

/// Fingerprint of the 1.0.0 key embedded in `js/main.js`.
pub const OLD_KEY_HASH: &str = "06494167914dab96fc9e58b5e2ee9eb98ad230edd6048d2134b8e18a0726f7c4";

/// Fingerprint of the key used by 1.0.1 and later.
pub const KEY_HASH: &str = "b1d50d2686248fc493b71cd490cb88ac75e71caff236fdb4ab9fa78a36319e11";

/// `--6bdb2e585882fbd48826ef9cffd4c511` is v1.0.8's launch option, which
/// makes this the decryption key.
pub const DEFAULT_KEY: &str = "6bdb2e585882fbd48826ef9cffd4c511";

const KEY_MARKER: &str = "let key='";
const SCRIPT_PATH: &str = "js/main.js";

static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--([0-9a-f]{32})").unwrap());

/// A key that passed resolution. Immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey(String);

impl ResolvedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw bytes fed to the cipher as the symmetric key.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Lowercase hex sha-256 of a candidate key's utf-8 encoding.
pub fn fingerprint(candidate: &str) -> String {
    hex::encode(Sha256::digest(candidate.as_bytes()))
}

/// Pulls the key out of a pasted Steam launch-option string.
pub fn launch_option_key(options: &str) -> Option<&str> {
    KEY_PATTERN
        .captures(options)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extracts the key embedded between `let key='` and the closing `';`.
pub fn embedded_key(script: &str) -> Option<&str> {
    let (_, rest) = script.split_once(KEY_MARKER)?;
    rest.split_once("';").map(|(key, _)| key)
}

/// Outcome of a single verification tier.
enum Verdict {
    Resolved(ResolvedKey),
    Inconclusive,
}

/// Legacy tier: unless the candidate already is the 1.0.0 key, look for one
/// embedded in the game script. A marker that fails verification is a hard
/// stop, not a fallback.
fn from_script(hash: &str, script: Option<&str>) -> Result<Verdict> {
    if hash == OLD_KEY_HASH {
        return Ok(Verdict::Inconclusive);
    }

    let Some(embedded) = script.and_then(embedded_key) else {
        return Ok(Verdict::Inconclusive);
    };

    let found = fingerprint(embedded);

    if found == OLD_KEY_HASH {
        info!("OMORI 1.0.0 decryption key found");
        Ok(Verdict::Resolved(ResolvedKey(embedded.to_owned())))
    } else {
        Err(Error::InvalidKey { found })
    }
}

/// Modern tier: accept the candidate as-is when it matches the current
/// fingerprint.
fn as_supplied(hash: &str, candidate: &str) -> Verdict {
    if hash == KEY_HASH {
        Verdict::Resolved(ResolvedKey(candidate.to_owned()))
    } else {
        Verdict::Inconclusive
    }
}

/// Resolves the key to decrypt with, given the user's candidate and the
/// content of `js/main.js` when that file exists.
///
/// Every path except a failed legacy verification terminates in a key: with
/// no better evidence the v1.0.8 launch-option key is assumed, which can
/// silently decrypt to garbage when the guess is wrong.
pub fn resolve(candidate: &str, script: Option<&str>) -> Result<ResolvedKey> {
    let hash = fingerprint(candidate);

    if let Verdict::Resolved(key) = from_script(&hash, script)? {
        return Ok(key);
    }

    if let Verdict::Resolved(key) = as_supplied(&hash, candidate) {
        debug!("supplied key matches the current fingerprint");
        return Ok(key);
    }

    info!("Found decryption key.");
    Ok(ResolvedKey(DEFAULT_KEY.to_owned()))
}

/// [`resolve`] with the script lookup performed against `root/js/main.js`.
pub fn resolve_in(candidate: &str, root: &Path) -> Result<ResolvedKey> {
    let script_path = root.join(SCRIPT_PATH);

    let script = if script_path.exists() {
        Some(fs::read_to_string(&script_path)?)
    } else {
        None
    };

    resolve(candidate, script.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_matches_current_fingerprint() {
        assert_eq!(fingerprint(DEFAULT_KEY), KEY_HASH);
    }

    #[test]
    fn matching_candidate_resolves_unchanged() {
        let key = resolve(DEFAULT_KEY, None).unwrap();
        assert_eq!(key.as_str(), DEFAULT_KEY);
    }

    #[test]
    fn blank_candidate_falls_back_to_default() {
        let key = resolve("", None).unwrap();
        assert_eq!(key.as_str(), DEFAULT_KEY);
    }

    #[test]
    fn marker_without_delimiter_is_ignored() {
        let key = resolve("", Some("let key=42")).unwrap();
        assert_eq!(key.as_str(), DEFAULT_KEY);
    }

    #[test]
    fn unverified_embedded_key_is_a_hard_stop() {
        let script = "function boot() { let key='deadbeef'; }";
        assert!(matches!(
            resolve("", Some(script)),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn embedded_key_extraction() {
        let script = "var x = 1;\nlet key='0123456789abcdef0123456789abcdef';\nboot();";
        assert_eq!(
            embedded_key(script),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert_eq!(embedded_key("no marker here"), None);
    }

    #[test]
    fn launch_option_extraction() {
        assert_eq!(
            launch_option_key("--6bdb2e585882fbd48826ef9cffd4c511"),
            Some(DEFAULT_KEY)
        );
        assert_eq!(launch_option_key("--not-a-key"), None);
        assert_eq!(launch_option_key(""), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve("anything", None).unwrap();
        let b = resolve("anything", None).unwrap();
        assert_eq!(a, b);
    }
}
