//! SQLite-backed store for the single current OAuth token.

use std::sync::Arc;

use async_trait::async_trait;
use catalogsync_core::CredentialStore;
use catalogsync_domain::constants::SINGLETON_TOKEN_ID;
use catalogsync_domain::{CatalogSyncError, OAuthToken, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio::task;

use super::manager::{map_join_error, map_sql_error, DbManager};

pub struct SqliteCredentialStore {
    db: Arc<DbManager>,
}

impl SqliteCredentialStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn load(&self) -> Result<Option<OAuthToken>> {
        let db = self.db.clone();
        task::spawn_blocking(move || -> Result<Option<OAuthToken>> {
            let conn = db.get_connection()?;
            let row = conn
                .query_row(TOKEN_SELECT_SQL, params![SINGLETON_TOKEN_ID], map_token_row)
                .optional()
                .map_err(map_sql_error)?;
            row.map(TokenRow::into_token).transpose()
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, token: &OAuthToken) -> Result<()> {
        let db = self.db.clone();
        let token = token.clone();
        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                TOKEN_UPSERT_SQL,
                params![
                    SINGLETON_TOKEN_ID,
                    token.access_token,
                    token.refresh_token,
                    token.expires_at.timestamp(),
                    token.scope,
                    token.created_at.timestamp(),
                    token.updated_at.timestamp(),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// created_at is left untouched on conflict: it records the first insertion.
const TOKEN_UPSERT_SQL: &str = "INSERT INTO oauth_tokens
        (id, access_token, refresh_token, expires_at, scope, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(id) DO UPDATE SET
        access_token = excluded.access_token,
        refresh_token = excluded.refresh_token,
        expires_at = excluded.expires_at,
        scope = excluded.scope,
        updated_at = excluded.updated_at";

const TOKEN_SELECT_SQL: &str = "SELECT access_token, refresh_token, expires_at, scope,
        created_at, updated_at
    FROM oauth_tokens
    WHERE id = ?1";

struct TokenRow {
    access_token: String,
    refresh_token: String,
    expires_at: i64,
    scope: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TokenRow {
    fn into_token(self) -> Result<OAuthToken> {
        Ok(OAuthToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: from_unix(self.expires_at, "expires_at")?,
            scope: self.scope,
            created_at: from_unix(self.created_at, "created_at")?,
            updated_at: from_unix(self.updated_at, "updated_at")?,
        })
    }
}

fn map_token_row(row: &Row<'_>) -> rusqlite::Result<TokenRow> {
    Ok(TokenRow {
        access_token: row.get(0)?,
        refresh_token: row.get(1)?,
        expires_at: row.get(2)?,
        scope: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn from_unix(secs: i64, column: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        CatalogSyncError::Database(format!("oauth_tokens.{column} out of range: {secs}"))
    })
}
