//! Application context - dependency injection container

mod oauth_state;

use std::sync::Arc;

use catalogsync_core::{
    AttributeAdvisor, AttributeRequirementRepository, AuditService, CategoryRepository,
    CategorySynchronizer, NormalizationEngine, PendingSkuSource, RemoteCatalog, TokenManager,
};
use catalogsync_domain::{Config, Result};
use catalogsync_infra::{
    build_advisor, BlingClient, BlingOAuthClient, DbManager, PendingSkuFile,
    SqliteAttributeRequirementRepository, SqliteCategoryRepository, SqliteCredentialStore,
};
use tracing::{info, warn};

pub use oauth_state::OAuthStateStore;

/// Application context - holds all services and dependencies
///
/// Built once at startup and shared by every request handler. Credentials
/// are not validated here: a missing OAuth client or advisor key only fails
/// the requests that need it.
pub struct AppContext {
    pub config: Config,
    pub categories: Arc<dyn CategoryRepository>,
    pub requirements: Arc<dyn AttributeRequirementRepository>,
    pub tokens: Arc<TokenManager>,
    pub remote: Arc<dyn RemoteCatalog>,
    pub advisor: Option<Arc<AttributeAdvisor>>,
    pub pending_skus: Arc<dyn PendingSkuSource>,
    pub oauth_states: OAuthStateStore,
}

impl AppContext {
    /// Open the database, apply migrations and wire the production adapters.
    ///
    /// # Errors
    /// Database failures and an invalid transport timeout abort startup.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;
        info!(path = %db.path().display(), "database ready");

        let oauth = Arc::new(BlingOAuthClient::from_config(&config)?);
        let store = Arc::new(SqliteCredentialStore::new(db.clone()));
        let tokens = Arc::new(TokenManager::new(store, oauth));

        let remote: Arc<dyn RemoteCatalog> =
            Arc::new(BlingClient::from_config(&config, tokens.clone())?);

        let advisor = match build_advisor(&config) {
            Ok(advisor) => {
                info!(models = ?advisor.model_names(), "attribute advisor configured");
                Some(Arc::new(advisor))
            }
            Err(err) => {
                warn!(error = %err, "attribute advisor disabled");
                None
            }
        };

        if config.require_oauth().is_err() {
            warn!("ERP OAuth credentials missing; authorization and ERP calls will fail");
        }

        Ok(Self {
            categories: Arc::new(SqliteCategoryRepository::new(db.clone())),
            requirements: Arc::new(SqliteAttributeRequirementRepository::new(db)),
            pending_skus: Arc::new(PendingSkuFile::new(&config.pending_skus_path)),
            tokens,
            remote,
            advisor,
            config,
            oauth_states: OAuthStateStore::default(),
        })
    }

    pub fn synchronizer(&self) -> CategorySynchronizer {
        CategorySynchronizer::new(self.categories.clone(), self.remote.clone())
    }

    pub fn normalization_engine(&self) -> NormalizationEngine {
        let engine = NormalizationEngine::new(
            self.categories.clone(),
            self.requirements.clone(),
            self.remote.clone(),
        );
        match &self.advisor {
            Some(advisor) => engine.with_advisor(advisor.clone()),
            None => engine,
        }
    }

    pub fn audit_service(&self) -> AuditService {
        AuditService::new(self.remote.clone(), self.pending_skus.clone())
    }
}
