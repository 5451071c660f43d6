//! Storage configuration types.

use std::path::PathBuf;

use civica_shared::StorageSettings;
use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, Supabase, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned download URL TTL in seconds (default: 3600 = 1 hour).
    pub presign_download_ttl_secs: u64,
}

impl StorageConfig {
    /// Default download TTL: 1 hour.
    pub const DEFAULT_DOWNLOAD_TTL: u64 = 3600;

    /// Longest TTL accepted from settings: 7 days, the SigV4 presign limit.
    pub const MAX_DOWNLOAD_TTL: u64 = 7 * 24 * 3600;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_download_ttl_secs: Self::DEFAULT_DOWNLOAD_TTL,
        }
    }

    /// Set presigned download URL TTL.
    #[must_use]
    pub fn with_download_ttl(mut self, secs: u64) -> Self {
        self.presign_download_ttl_secs = secs;
        self
    }

    /// Build a storage config from loosely typed settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the provider is unknown, a field it
    /// requires is missing, or the download TTL is zero or above
    /// [`Self::MAX_DOWNLOAD_TTL`].
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.provider.as_str() {
            "s3" => StorageProvider::S3 {
                endpoint: required(settings.endpoint.as_ref(), "endpoint")?,
                bucket: required(settings.bucket.as_ref(), "bucket")?,
                access_key_id: required(settings.access_key_id.as_ref(), "access_key_id")?,
                secret_access_key: required(
                    settings.secret_access_key.as_ref(),
                    "secret_access_key",
                )?,
                region: settings
                    .region
                    .clone()
                    .unwrap_or_else(|| "auto".to_string()),
            },
            "azure_blob" => StorageProvider::AzureBlob {
                account: required(settings.account.as_ref(), "account")?,
                access_key: required(settings.access_key.as_ref(), "access_key")?,
                container: required(settings.container.as_ref(), "container")?,
            },
            "local" => StorageProvider::local_fs(required(settings.root.as_ref(), "root")?),
            other => {
                return Err(StorageError::configuration(format!(
                    "unknown storage provider '{other}'"
                )));
            }
        };

        let config = Self::new(provider);
        match settings.download_ttl_secs {
            Some(ttl) if ttl == 0 || ttl > Self::MAX_DOWNLOAD_TTL => {
                Err(StorageError::configuration(format!(
                    "download_ttl_secs must be between 1 and {}, got {ttl}",
                    Self::MAX_DOWNLOAD_TTL
                )))
            }
            Some(ttl) => Ok(config.with_download_ttl(ttl)),
            None => Ok(config),
        }
    }
}

fn required(value: Option<&String>, field: &str) -> Result<String, StorageError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| StorageError::configuration(format!("missing storage setting '{field}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(StorageProvider::local_fs("./storage"));
        assert_eq!(
            config.presign_download_ttl_secs,
            StorageConfig::DEFAULT_DOWNLOAD_TTL
        );
        assert_eq!(config.provider.name(), "local");
    }

    #[test]
    fn test_from_settings_s3() {
        let settings = StorageSettings {
            provider: "s3".to_string(),
            endpoint: Some("https://account.r2.cloudflarestorage.com".to_string()),
            bucket: Some("attachments".to_string()),
            access_key_id: Some("access_key".to_string()),
            secret_access_key: Some("secret_key".to_string()),
            download_ttl_secs: Some(60),
            ..StorageSettings::default()
        };

        let config = StorageConfig::from_settings(&settings).unwrap();
        assert_eq!(config.provider.name(), "s3");
        assert_eq!(config.presign_download_ttl_secs, 60);
        match config.provider {
            StorageProvider::S3 { region, .. } => assert_eq!(region, "auto"),
            other => panic!("unexpected provider {other:?}"),
        }
    }

    #[test]
    fn test_from_settings_missing_field() {
        let settings = StorageSettings {
            provider: "azure_blob".to_string(),
            account: Some("civicadev".to_string()),
            container: Some("attachments".to_string()),
            ..StorageSettings::default()
        };

        let err = StorageConfig::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("access_key"));
    }

    #[test]
    fn test_from_settings_rejects_out_of_range_ttl() {
        for ttl in [0, StorageConfig::MAX_DOWNLOAD_TTL + 1, u64::MAX] {
            let settings = StorageSettings {
                provider: "local".to_string(),
                root: Some("./storage".to_string()),
                download_ttl_secs: Some(ttl),
                ..StorageSettings::default()
            };

            let err = StorageConfig::from_settings(&settings).unwrap_err();
            assert!(err.to_string().contains("download_ttl_secs"), "{err}");
        }
    }

    #[test]
    fn test_from_settings_unknown_provider() {
        let settings = StorageSettings {
            provider: "ftp".to_string(),
            ..StorageSettings::default()
        };

        assert!(matches!(
            StorageConfig::from_settings(&settings),
            Err(StorageError::Configuration(_))
        ));
    }
}
