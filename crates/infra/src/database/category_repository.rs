//! SQLite-backed category tree and attribute requirements.
//!
//! `categories.remote_id` is set once: the update statement only matches rows
//! whose remote id is still NULL (or already equal to the new value), so a
//! concurrent or repeated sync can never re-point a category at a different
//! ERP record.

use std::sync::Arc;

use async_trait::async_trait;
use catalogsync_core::{AttributeRequirementRepository, CategoryRepository};
use catalogsync_domain::{
    AttributeRequirement, CatalogSyncError, Category, CategoryId, RemoteId, Result,
};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_join_error, map_sql_error, DbManager, SqliteConnection};

pub struct SqliteCategoryRepository {
    db: Arc<DbManager>,
}

impl SqliteCategoryRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<Vec<Category>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(CATEGORY_LIST_SQL).map_err(map_sql_error)?;
            let rows = stmt.query_map([], map_category_row).map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<Option<Category>> {
            let conn = db.get_connection()?;
            find_category(&conn, id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_remote_id(&self, id: CategoryId, remote_id: RemoteId) -> Result<()> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(CATEGORY_SET_REMOTE_ID_SQL, params![id, remote_id])
                .map_err(map_sql_error)?;
            if updated == 1 {
                debug!(category_id = id, remote_id, "remote id recorded");
                return Ok(());
            }

            match find_category(&conn, id)? {
                None => Err(CatalogSyncError::NotFound(format!("category {id} does not exist"))),
                Some(existing) => Err(CatalogSyncError::InvalidInput(format!(
                    "category {id} already linked to remote id {}",
                    existing.remote_id.unwrap_or_default()
                ))),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_category(&self, name: &str, parent_id: Option<CategoryId>) -> Result<Category> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogSyncError::InvalidInput("category name must not be empty".into()));
        }

        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<Category> {
            let conn = db.get_connection()?;
            conn.execute(CATEGORY_INSERT_SQL, params![name, parent_id]).map_err(map_sql_error)?;
            Ok(Category { id: conn.last_insert_rowid(), name, parent_id, remote_id: None })
        })
        .await
        .map_err(map_join_error)?
    }
}

pub struct SqliteAttributeRequirementRepository {
    db: Arc<DbManager>,
}

impl SqliteAttributeRequirementRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Store a requirement row. Used by the seed tool; the services only read.
    pub async fn insert(&self, requirement: AttributeRequirement) -> Result<()> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                REQUIREMENT_INSERT_SQL,
                params![
                    requirement.category_id,
                    requirement.marketplace_id,
                    requirement.attribute_name,
                    requirement.is_required,
                    requirement.default_value,
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl AttributeRequirementRepository for SqliteAttributeRequirementRepository {
    async fn list_for_category(&self, category_id: CategoryId) -> Result<Vec<AttributeRequirement>> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<Vec<AttributeRequirement>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(REQUIREMENT_BY_CATEGORY_SQL).map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![category_id], map_requirement_row)
                .map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

const CATEGORY_LIST_SQL: &str =
    "SELECT id, name, parent_id, remote_id FROM categories ORDER BY id";

const CATEGORY_BY_ID_SQL: &str =
    "SELECT id, name, parent_id, remote_id FROM categories WHERE id = ?1";

const CATEGORY_SET_REMOTE_ID_SQL: &str = "UPDATE categories SET remote_id = ?2
    WHERE id = ?1 AND (remote_id IS NULL OR remote_id = ?2)";

const CATEGORY_INSERT_SQL: &str = "INSERT INTO categories (name, parent_id) VALUES (?1, ?2)";

const REQUIREMENT_BY_CATEGORY_SQL: &str =
    "SELECT category_id, marketplace_id, attribute_name, is_required, default_value
    FROM attribute_requirements
    WHERE category_id = ?1
    ORDER BY id";

const REQUIREMENT_INSERT_SQL: &str = "INSERT INTO attribute_requirements
    (category_id, marketplace_id, attribute_name, is_required, default_value)
    VALUES (?1, ?2, ?3, ?4, ?5)";

fn find_category(conn: &SqliteConnection, id: CategoryId) -> Result<Option<Category>> {
    conn.query_row(CATEGORY_BY_ID_SQL, params![id], map_category_row)
        .optional()
        .map_err(map_sql_error)
}

fn map_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: row.get(2)?,
        remote_id: row.get(3)?,
    })
}

fn map_requirement_row(row: &Row<'_>) -> rusqlite::Result<AttributeRequirement> {
    Ok(AttributeRequirement {
        category_id: row.get(0)?,
        marketplace_id: row.get(1)?,
        attribute_name: row.get(2)?,
        is_required: row.get(3)?,
        default_value: row.get(4)?,
    })
}
