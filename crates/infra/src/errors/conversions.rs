//! Conversions from external infrastructure errors into domain errors.

use catalogsync_domain::CatalogSyncError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CatalogSyncError);

impl From<InfraError> for CatalogSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CatalogSyncError> for InfraError {
    fn from(value: CatalogSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoCatalogSyncError {
    fn into_domain(self) -> CatalogSyncError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CatalogSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCatalogSyncError for SqlError {
    fn into_domain(self) -> CatalogSyncError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        CatalogSyncError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CatalogSyncError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        CatalogSyncError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        CatalogSyncError::Database("foreign key constraint violation".into())
                    }
                    _ => CatalogSyncError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CatalogSyncError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CatalogSyncError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CatalogSyncError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                CatalogSyncError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                CatalogSyncError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => CatalogSyncError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => CatalogSyncError::Database("invalid SQL query".into()),
            other => CatalogSyncError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CatalogSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCatalogSyncError for HttpError {
    fn into_domain(self) -> CatalogSyncError {
        if self.is_timeout() {
            return CatalogSyncError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return CatalogSyncError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => CatalogSyncError::RemoteApi { status: code, body: message },
                404 => CatalogSyncError::NotFound(message),
                429 => CatalogSyncError::Network(message),
                400..=499 => CatalogSyncError::InvalidInput(message),
                500..=599 => CatalogSyncError::Network(message),
                _ => CatalogSyncError::Network(message),
            };
        }

        CatalogSyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CatalogSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCatalogSyncError for r2d2::Error {
    fn into_domain(self) -> CatalogSyncError {
        CatalogSyncError::Database(format!("connection pool error: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → CatalogSyncError */
/* -------------------------------------------------------------------------- */

impl IntoCatalogSyncError for tokio::task::JoinError {
    fn into_domain(self) -> CatalogSyncError {
        if self.is_cancelled() {
            CatalogSyncError::Internal("blocking task cancelled".into())
        } else {
            CatalogSyncError::Internal(format!("blocking task failed: {self}"))
        }
    }
}

impl From<tokio::task::JoinError> for InfraError {
    fn from(value: tokio::task::JoinError) -> Self {
        InfraError(value.into_domain())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
