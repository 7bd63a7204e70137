/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_uploads")]
    pub uploads: UploadSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// JSON document holding users and listings
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory uploaded media is written to and served from
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Static frontend assets
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub password_storage: PasswordStorage,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

/// How passwords are written to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStorage {
    /// Stored as given, readable by older deployments sharing the same file
    #[default]
    Plaintext,
    /// Stored as a bcrypt hash
    Bcrypt,
}

impl ServerConfig {
    /// Load configuration from an explicit file (or `config.toml` when `None`)
    /// and environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. SOCIATY_SERVER__PORT
        settings = settings.add_source(
            config::Environment::with_prefix("SOCIATY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Port must not be 0".to_string()));
        }

        if self.uploads.max_files == 0 {
            return Err(ServerError::Config(
                "uploads.max_files must be at least 1".to_string(),
            ));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_path: default_database_path(),
        upload_dir: default_upload_dir(),
        public_dir: default_public_dir(),
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./db.json")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_uploads() -> UploadSettings {
    UploadSettings {
        max_files: default_max_files(),
        max_request_bytes: default_max_request_bytes(),
    }
}

fn default_max_files() -> usize {
    6
}

fn default_max_request_bytes() -> usize {
    64 * 1024 * 1024
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        password_storage: PasswordStorage::default(),
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            uploads: default_uploads(),
            auth: default_auth(),
        }
    }
}
