//! On-disk document format

use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use sociaty_core::{Listing, User};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The whole persisted state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Registered users, oldest first
    #[serde(default)]
    pub users: Vec<User>,

    /// Listings, newest first
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Read the document at `path`
///
/// A missing or blank file reads as an empty document.
pub async fn load(path: &Path) -> Result<Document> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::default()),
        Err(e) => return Err(e.into()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::default());
    }

    serde_json::from_slice(&bytes).map_err(|e| StorageError::corrupt(path, e))
}

/// Replace the document at `path`
///
/// The new contents go to a sibling temporary file first and are then renamed
/// over the target, so readers see either the old or the new document.
pub async fn save(path: &Path, document: &Document) -> Result<()> {
    let json = serde_json::to_vec_pretty(document)?;

    let temp = temp_path(path);
    fs::write(&temp, &json).await?;
    fs::rename(&temp, path).await?;

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("db.json"));
    name.push(".tmp");
    path.with_file_name(name)
}
