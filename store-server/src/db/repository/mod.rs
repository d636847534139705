//! Repository Module
//!
//! CRUD operations for the SurrealDB tables. One repository per table on top
//! of a shared [`BaseRepository`] holding the connection handle.
//!
//! ID convention: the whole stack uses the `"table:key"` string form; bare
//! keys are accepted on input and qualified here.

pub mod order;
pub mod product;
pub mod user;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations are the store's uniqueness constraint
        // firing (order number, user email); everything else is opaque.
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a client-supplied id into a [`RecordId`] for the given table.
/// Accepts both `"table:key"` and bare `"key"` forms; a prefix naming a
/// different table is rejected.
pub fn parse_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.is_empty() {
        return Err(RepoError::InvalidId(id.to_string()));
    }
    match id.split_once(':') {
        // Qualified form goes through the native parser, which also handles
        // escaped keys
        Some((t, _)) if t == table => id
            .parse::<RecordId>()
            .map_err(|_| RepoError::InvalidId(id.to_string())),
        Some(_) => Err(RepoError::InvalidId(id.to_string())),
        None => Ok(RecordId::from_table_key(table, id)),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
