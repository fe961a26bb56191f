//! Configuration for the restaurant onboarding module

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Restaurant onboarding configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Bucket for about, photo and dish images
    #[serde(default = "default_images_bucket")]
    pub images_bucket: String,

    /// Bucket for menu PDFs
    #[serde(default = "default_pdfs_bucket")]
    pub pdfs_bucket: String,

    /// Maximum decoded size of a single uploaded asset in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Seconds of inactivity after which a wizard session is dropped
    #[serde(default = "default_session_idle_ttl_secs")]
    pub session_idle_ttl_secs: u64,

    /// Wizard sessions held in memory at once
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Content store backend
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where uploaded assets are written
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "backend", rename_all = "snake_case", deny_unknown_fields)]
pub enum StorageConfig {
    /// Local directory, one subdirectory per bucket
    Filesystem {
        #[serde(default = "default_storage_root")]
        root: PathBuf,
        /// Base address the stored objects are served under
        #[serde(default = "default_public_base_url")]
        public_base_url: String,
    },
    /// Supabase-compatible storage API
    Http {
        base_url: String,
        /// Never written back out; serializes as a mask
        #[serde(serialize_with = "redact")]
        api_key: String,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: default_storage_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_bucket: default_images_bucket(),
            pdfs_bucket: default_pdfs_bucket(),
            max_upload_bytes: default_max_upload_bytes(),
            session_idle_ttl_secs: default_session_idle_ttl_secs(),
            max_sessions: default_max_sessions(),
            storage: StorageConfig::default(),
        }
    }
}

fn redact<S: serde::Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if secret.is_empty() { "" } else { "***" })
}

fn default_images_bucket() -> String {
    "restaurant-images".to_string()
}

fn default_pdfs_bucket() -> String {
    "restaurant-pdfs".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_session_idle_ttl_secs() -> u64 {
    60 * 60
}

fn default_max_sessions() -> usize {
    1000
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8080/uploads".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.images_bucket, "restaurant-images");
        assert_eq!(cfg.pdfs_bucket, "restaurant-pdfs");
        assert_eq!(cfg.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(cfg.session_idle_ttl_secs, 3600);
        assert_eq!(cfg.max_sessions, 1000);
        assert!(matches!(cfg.storage, StorageConfig::Filesystem { .. }));
    }

    #[test]
    fn http_backend_parses() {
        let cfg: Config = serde_json::from_str(
            r#"{"storage":{"backend":"http","base_url":"https://x.supabase.co","api_key":"k"}}"#,
        )
        .unwrap();
        match cfg.storage {
            StorageConfig::Http { base_url, api_key } => {
                assert_eq!(base_url, "https://x.supabase.co");
                assert_eq!(api_key, "k");
            }
            other => panic!("unexpected backend: {other:?}"),
        }
    }

    #[test]
    fn api_key_is_masked_when_serialized() {
        let cfg = Config {
            storage: StorageConfig::Http {
                base_url: "https://x.supabase.co".into(),
                api_key: "service-role-secret".into(),
            },
            ..Config::default()
        };
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["storage"]["api_key"], "***");
        assert_eq!(json["storage"]["base_url"], "https://x.supabase.co");
        assert!(!json.to_string().contains("service-role-secret"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"bucket":"x"}"#).is_err());
    }
}
