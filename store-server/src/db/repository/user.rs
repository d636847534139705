//! User Repository

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Role, User};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

/// Insert record. `User` skips its password hash on serialization, so the
/// write path needs its own shape that does persist it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewUser {
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let record_id = parse_id(USER_TABLE, id)?;
        let user: Option<User> = self.base.db().select(record_id).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let user: Option<User> = result.take(0)?;
        Ok(user)
    }

    /// Create a new account. The unique index on `email` rejects duplicate
    /// registrations as a `Duplicate` write failure.
    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> RepoResult<User> {
        let record = NewUser {
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        let created: Option<User> = self.base.db().create(USER_TABLE).content(record).await?;

        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
