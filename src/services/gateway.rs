//! Query gateway: runs a page's query against the external store and
//! hands back the single JSON value it produced.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use serde_json::value::RawValue;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Column, PgPool, Row, TypeInfo};

use crate::db;

/// Failures while executing a page query. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Query returned no rows")]
    NoRows,

    #[error("Query returned more than one row")]
    MultipleRows,

    #[error("Expected exactly one column, got {0}")]
    ColumnCount(usize),

    #[error("Unsupported result column type: {0}")]
    ColumnType(String),
}

/// Executes opaque query text and returns the already-serialized JSON
/// from its single result cell.
#[async_trait]
pub trait QueryGateway: Send + Sync {
    async fn execute(&self, query: &str) -> Result<String, GatewayError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), GatewayError>;
}

/// A result set is usable only when it is exactly one row by one column.
/// `rows` is the number of rows seen, capped once a second row shows up.
pub fn check_shape(rows: usize, columns: usize) -> Result<(), GatewayError> {
    match rows {
        0 => return Err(GatewayError::NoRows),
        1 => {}
        _ => return Err(GatewayError::MultipleRows),
    }
    if columns != 1 {
        return Err(GatewayError::ColumnCount(columns));
    }
    Ok(())
}

/// [`QueryGateway`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgQueryGateway {
    pool: PgPool,
}

impl PgQueryGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and wrap it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = db::create_pool(database_url, max_connections).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl QueryGateway for PgQueryGateway {
    async fn execute(&self, query: &str) -> Result<String, GatewayError> {
        tracing::debug!(query = %query, "Executing page query");

        // Stop reading after the second row; anything past one is an error.
        let mut rows = sqlx::query(query).fetch(&self.pool);
        let Some(row) = rows.try_next().await? else {
            return Err(GatewayError::NoRows);
        };
        let seen = if rows.try_next().await?.is_some() { 2 } else { 1 };
        check_shape(seen, row.len())?;

        extract_json(&row)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Pull the single cell out as JSON text. `json` comes back untouched,
/// text types verbatim, SQL NULL as the literal `null`.
///
/// Numeric and other scalar types are rejected on purpose: only columns
/// that already hold JSON (or JSON text) are served as `application/json`.
fn extract_json(row: &PgRow) -> Result<String, GatewayError> {
    let type_name = row.columns()[0].type_info().name().to_string();

    let text = match type_name.as_str() {
        "JSON" | "JSONB" => row
            .try_get::<Option<Json<Box<RawValue>>>, _>(0)?
            .map(|Json(raw)| raw.get().to_string()),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "UNKNOWN" => {
            row.try_get::<Option<String>, _>(0)?
        }
        _ => return Err(GatewayError::ColumnType(type_name)),
    };

    Ok(text.unwrap_or_else(|| "null".to_string()))
}
