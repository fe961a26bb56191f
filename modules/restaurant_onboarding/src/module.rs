//! Module assembly and lifecycle
//!
//! Builds the repository, content store, uploader and domain service from
//! configuration, and exposes migrations, the REST router and the native
//! client.

use crate::api::native::NativeClient;
use crate::api::rest::{register_routes, AssetLimits};
use crate::config::{Config, StorageConfig};
use crate::contract::OnboardingApi;
use crate::domain::session::SessionLimits;
use crate::domain::{
    BlobStore, Buckets, LogNotifier, Notifier, Service, SubmissionRepository, Uploader,
};
use crate::infra::blob::{FsBlobStore, HttpBlobStore};
use crate::infra::storage::{Migrator, SeaOrmSubmissionRepository};
use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Restaurant onboarding module
pub struct OnboardingModule {
    config: Config,
    service: Arc<Service>,
}

impl OnboardingModule {
    /// Wire the module against a database connection and the configured store
    pub fn new(config: Config, db: Arc<DatabaseConnection>) -> Result<Self> {
        let repo = Arc::new(SeaOrmSubmissionRepository::new(db));
        let store = build_store(&config.storage)?;
        Ok(Self::from_parts(config, repo, store, Arc::new(LogNotifier)))
    }

    /// Wire the module from already built collaborators
    pub fn from_parts(
        config: Config,
        repo: Arc<dyn SubmissionRepository>,
        store: Arc<dyn BlobStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let buckets = Buckets {
            images: config.images_bucket.clone(),
            pdfs: config.pdfs_bucket.clone(),
        };
        let uploader = Arc::new(Uploader::new(store, buckets));
        let limits = SessionLimits {
            idle_ttl: Duration::from_secs(config.session_idle_ttl_secs),
            max_sessions: config.max_sessions,
        };
        let service = Arc::new(Service::with_session_limits(repo, uploader, notifier, limits));

        tracing::info!(
            images_bucket = %config.images_bucket,
            pdfs_bucket = %config.pdfs_bucket,
            max_upload_bytes = config.max_upload_bytes,
            session_idle_ttl_secs = config.session_idle_ttl_secs,
            max_sessions = config.max_sessions,
            "restaurant onboarding initialized"
        );
        Self { config, service }
    }

    /// Apply pending database migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("restaurant onboarding migrations completed");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn OnboardingApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// REST routes of the module
    pub fn router(&self) -> axum::Router {
        tracing::info!("registering restaurant onboarding REST routes");
        register_routes(
            axum::Router::new(),
            self.service.clone(),
            AssetLimits::new(self.config.max_upload_bytes),
        )
    }
}

fn build_store(storage: &StorageConfig) -> Result<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match storage {
        StorageConfig::Filesystem {
            root,
            public_base_url,
        } => {
            let base = Url::parse(public_base_url)
                .with_context(|| format!("invalid public_base_url '{public_base_url}'"))?;
            Arc::new(FsBlobStore::new(root.clone(), base))
        }
        StorageConfig::Http { base_url, api_key } => {
            let base = Url::parse(base_url)
                .with_context(|| format!("invalid storage base_url '{base_url}'"))?;
            Arc::new(HttpBlobStore::new(base, api_key.clone()))
        }
    };
    Ok(store)
}
