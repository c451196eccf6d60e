use crate::{
    assets,
    decryptor::{self, DecryptContext},
    key,
    progress::TermProgress,
};
use anyhow::Result;
use clap::Args;
use kdam::term::Colorizer;
use log::info;
use std::path::{Path, PathBuf};

/// Decrypt every encrypted asset under a game directory.
#[derive(Debug, Clone, Args)]
pub struct Decrypt {
    /// Root asset directory (the game's www folder).
    #[arg(required = true)]
    directory: PathBuf,

    /// Candidate decryption key.
    /// Accepts the bare key or a pasted Steam launch-option string.
    #[arg(short, long, default_value = "", hide_default_value = true)]
    key: String,

    /// Write decrypted json payloads as-is, without re-indentation.
    #[arg(long)]
    no_beautify: bool,
}

impl Decrypt {
    pub fn execute(self) -> Result<()> {
        let candidate = key::launch_option_key(&self.key).unwrap_or(&self.key);
        let resolved = key::resolve_in(candidate, &self.directory)?;

        let ctx = DecryptContext {
            key: resolved,
            folder: self.directory.clone(),
        };

        info!("Finding files to decrypt...");
        let files = find_encrypted_files(&ctx.folder)?;

        if files.is_empty() {
            info!("Nothing found!");
            return Ok(());
        }

        let mut progress = TermProgress::new();
        let report = decryptor::decrypt_all(Some(&ctx), &files, !self.no_beautify, &mut progress)?;
        progress.finish();

        info!(
            "{} decrypted, {} failed",
            report.succeeded.len().to_string().colorize("bold green"),
            if report.failed.is_empty() {
                report.failed.len().to_string().colorize("bold green")
            } else {
                report.failed.len().to_string().colorize("bold red")
            },
        );

        Ok(())
    }
}

fn find_encrypted_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];

    for ext in assets::ENCRYPTED_EXTENSIONS {
        let pattern = root.join(format!("**/*.{ext}"));

        for file in glob::glob(&pattern.to_string_lossy())? {
            files.push(file?);
        }
    }

    files.sort();
    Ok(files)
}
