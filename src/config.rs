use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// -----------------------------------------------------------------------------
// Config (root)
// -----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let path = Path::new(path);
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        serde_saphyr::from_str(&contents).map_err(ConfigError::Yaml)
    }
}

/// Resolve a configured path. Relative paths are resolved against the
/// directory containing the config file.
pub fn resolve_path(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    config_dir.join(path)
}

// -----------------------------------------------------------------------------
// ServerConfig
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

// -----------------------------------------------------------------------------
// StorageConfig
// -----------------------------------------------------------------------------

/// Where post and featured-entry documents live on disk.
///
/// Uploaded files are spooled under `<path>/uploads` before being handed to
/// the image store.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(".inkpost/data")
}

// -----------------------------------------------------------------------------
// ImagesConfig
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ImagesConfig {
    /// Image store backend: `local` or `remote`.
    #[serde(default = "default_images_backend")]
    pub backend: String,
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    /// Base URL prefixed to locally stored media when building public URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default)]
    pub remote: RemoteImagesConfig,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            backend: default_images_backend(),
            media_dir: default_media_dir(),
            public_base_url: default_public_base_url(),
            remote: RemoteImagesConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoteImagesConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

fn default_images_backend() -> String {
    "local".to_string()
}

fn default_media_dir() -> PathBuf {
    PathBuf::from(".inkpost/media")
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

// -----------------------------------------------------------------------------
// ConfigError
// -----------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_saphyr::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Yaml(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.storage.path, PathBuf::from(".inkpost/data"));
        assert_eq!(config.images.backend, "local");
        assert_eq!(config.images.media_dir, PathBuf::from(".inkpost/media"));
        assert_eq!(config.images.public_base_url, "http://localhost:8080");
        assert!(config.images.remote.base_url.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let tmp_dir = TempDir::new().unwrap();
        let missing_path = tmp_dir.path().join("missing-config.yaml");
        let config = Config::load(missing_path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_valid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 3000
  request_timeout_seconds: 60
storage:
  path: "/var/lib/inkpost"
images:
  backend: remote
  remote:
    base_url: "https://images.example.com"
    api_key: "secret"
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_seconds, 60);
        assert_eq!(config.storage.path, PathBuf::from("/var/lib/inkpost"));
        assert_eq!(config.images.backend, "remote");
        assert_eq!(
            config.images.remote.base_url.as_deref(),
            Some("https://images.example.com")
        );
        assert_eq!(config.images.remote.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_load_partial_yaml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  port: 9000
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0"); // default
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout_seconds, 30); // default
        assert_eq!(config.storage.path, PathBuf::from(".inkpost/data")); // default
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(file.path().to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_path() {
        let config_path = Path::new("/etc/inkpost/inkpost.yaml");
        assert_eq!(
            resolve_path(config_path, Path::new("data")),
            PathBuf::from("/etc/inkpost/data")
        );
        assert_eq!(
            resolve_path(config_path, Path::new("/var/data")),
            PathBuf::from("/var/data")
        );
    }
}
