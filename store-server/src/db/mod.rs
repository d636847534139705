//! Database Module
//!
//! Embedded SurrealDB connection and schema bootstrap.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "storefront";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        if let Some(parent) = std::path::Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let service = Self::bootstrap(db).await?;
        tracing::info!(path = db_path, "Database connection established");
        Ok(service)
    }

    /// Finish setup on an already-opened connection: namespace/database
    /// selection plus the unique indexes backing the store-level
    /// constraints. Also the entry point for tests running on the in-memory
    /// engine.
    pub async fn bootstrap(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Order numbers are only probabilistically unique at generation
        // time; this index is the actual uniqueness guarantee.
        db.query("DEFINE INDEX IF NOT EXISTS order_number_idx ON order FIELDS orderNumber UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?;

        db.query("DEFINE INDEX IF NOT EXISTS user_email_idx ON user FIELDS email UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?;

        tracing::info!("Database schema applied");
        Ok(Self { db })
    }
}
