/// Upload storage service - writes listing media to disk
use crate::error::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

/// URL prefix the upload directory is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// A file received in a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client
    pub file_name: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    base_path: PathBuf,
    max_files: usize,
}

impl UploadStore {
    pub fn new(base_path: PathBuf, max_files: usize) -> Self {
        Self {
            base_path,
            max_files,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Maximum number of files accepted per request
    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Initialize the upload directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Build a stored file name: `<unix millis>-<random suffix><extension>`
    ///
    /// Only the extension of the client's file name is kept.
    pub fn generate_name(original: Option<&str>, now: DateTime<Utc>) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();

        let extension = original
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        format!("{}-{}{}", now.timestamp_millis(), suffix, extension)
    }

    /// Store one file, returning its public path
    pub async fn store(&self, file: &UploadedFile) -> Result<String> {
        let mut attempts = 0;
        loop {
            let name = Self::generate_name(file.file_name.as_deref(), Utc::now());
            let path = self.base_path.join(&name);

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut handle) => {
                    handle.write_all(&file.data).await?;
                    handle.flush().await?;
                    tracing::debug!(file = %name, bytes = file.data.len(), "Stored upload");
                    return Ok(format!("{}/{}", PUBLIC_PREFIX, name));
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && attempts < 3 => {
                    attempts += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Store files in order, returning their public paths
    pub async fn store_all(&self, files: &[UploadedFile]) -> Result<Vec<String>> {
        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            paths.push(self.store(file).await?);
        }
        Ok(paths)
    }
}
