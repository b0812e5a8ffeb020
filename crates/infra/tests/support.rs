#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use catalogsync_domain::{AttributeRequirement, Category, CategoryId};
use catalogsync_core::CategoryRepository;
use catalogsync_infra::database::{
    DbManager, SqliteAttributeRequirementRepository, SqliteCategoryRepository,
};
use catalogsync_infra::http::HttpClient;
use tempfile::TempDir;

/// Temporary migrated database that keeps its file alive for the test.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("catalogsync.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should run");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    pub fn categories(&self) -> Arc<SqliteCategoryRepository> {
        Arc::new(SqliteCategoryRepository::new(self.manager.clone()))
    }

    pub fn requirements(&self) -> Arc<SqliteAttributeRequirementRepository> {
        Arc::new(SqliteAttributeRequirementRepository::new(self.manager.clone()))
    }

    pub async fn insert_category(&self, name: &str, parent: Option<CategoryId>) -> Category {
        self.categories().insert_category(name, parent).await.expect("category inserted")
    }

    pub async fn insert_requirement(&self, category_id: CategoryId, name: &str) {
        self.requirements()
            .insert(AttributeRequirement {
                category_id,
                marketplace_id: "mercado_livre".into(),
                attribute_name: name.into(),
                is_required: true,
                default_value: None,
            })
            .await
            .expect("requirement inserted");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_http_client() -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .max_attempts(1)
        .build()
        .expect("http client")
}
