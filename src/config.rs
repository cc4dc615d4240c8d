use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Where uploaded audio blobs live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlobBackend {
    /// Files under the configured data directory.
    Local,
    /// Objects in an S3-compatible bucket.
    S3,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "songvault")]
#[command(about = "media library backend with byte-range audio streaming")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "SONGVAULT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SONGVAULT_PORT", default_value = "8080")]
    pub port: u16,

    /// Path of the metadata database file
    #[arg(long, env = "SONGVAULT_DB", default_value = "./songvault.redb")]
    pub db_path: PathBuf,

    /// Blob storage backend
    #[arg(long, env = "SONGVAULT_STORAGE", value_enum, default_value = "local")]
    pub storage: BlobBackend,

    /// Directory holding audio blobs (local backend)
    #[arg(long, env = "SONGVAULT_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Bucket name (s3 backend)
    #[arg(long, env = "SONGVAULT_S3_BUCKET")]
    pub s3_bucket: Option<String>,

    /// Object key prefix (s3 backend)
    #[arg(long, env = "SONGVAULT_S3_PREFIX", default_value = "")]
    pub s3_prefix: String,

    /// AWS region (s3 backend; SDK defaults apply when unset)
    #[arg(long, env = "SONGVAULT_S3_REGION")]
    pub s3_region: Option<String>,

    /// Custom endpoint URL for S3-compatible services
    #[arg(long, env = "SONGVAULT_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Enable CORS for all origins
    #[arg(long, env = "SONGVAULT_CORS", default_value = "true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Maximum upload size in bytes
    #[arg(long, env = "SONGVAULT_MAX_UPLOAD", default_value = "52428800")]
    pub max_upload: usize,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db_path: PathBuf::from("./songvault.redb"),
            storage: BlobBackend::Local,
            data_dir: PathBuf::from("./data"),
            s3_bucket: None,
            s3_prefix: String::new(),
            s3_region: None,
            s3_endpoint: None,
            cors: true,
            log_level: "info".to_string(),
            max_upload: 52428800,
        }
    }

    #[test]
    fn test_bind_addr_default() {
        assert_eq!(base_config().bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_addr_custom_port() {
        let config = Config {
            host: "localhost".to_string(),
            port: 3000,
            ..base_config()
        };
        assert_eq!(config.bind_addr(), "localhost:3000");
    }

    #[test]
    fn test_storage_backend_from_args() {
        let config = Config::try_parse_from(["songvault", "--storage", "s3"]).unwrap();
        assert_eq!(config.storage, BlobBackend::S3);
    }
}
