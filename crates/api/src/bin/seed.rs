//! Seed the local category tree with the default root categories.
//!
//! Only an empty table is seeded; existing rows are never touched.

use std::sync::Arc;

use anyhow::Context;
use catalogsync_api::utils::logging::init_tracing;
use catalogsync_core::CategoryRepository;
use catalogsync_infra::{DbManager, SqliteCategoryRepository};
use tracing::info;

const DEFAULT_ROOT_CATEGORIES: &[&str] =
    &["Eletrônicos", "Acessórios Automotivos", "Casa e Decoração"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = catalogsync_infra::config::load().context("failed to load configuration")?;
    let db = DbManager::new(&config.database.path, config.database.pool_size)
        .context("failed to open database")?;
    db.run_migrations().context("failed to run migrations")?;

    let repository = SqliteCategoryRepository::new(Arc::new(db));
    let existing = repository.list_categories().await?;
    if !existing.is_empty() {
        info!(count = existing.len(), "categories already present, nothing to seed");
        return Ok(());
    }

    for name in DEFAULT_ROOT_CATEGORIES {
        let category = repository.insert_category(name, None).await?;
        info!(id = category.id, name = %category.name, "category seeded");
    }

    info!(count = DEFAULT_ROOT_CATEGORIES.len(), "default categories inserted");
    Ok(())
}
