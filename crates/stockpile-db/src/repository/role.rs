//! # Role Repository
//!
//! Roles are a fixed set inserted by the seeder; requests only read them.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockpile_core::{Role, RoleName};

/// Repository for role lookups.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    /// Creates a new RoleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RoleRepository { pool }
    }

    /// Gets a role by name.
    ///
    /// ## Returns
    /// * `Ok(Some(Role))` - Role is seeded
    /// * `Ok(None)` - Role missing (seeder has not run)
    pub async fn get_by_name(&self, name: RoleName) -> DbResult<Option<Role>> {
        let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ?1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }

    /// Gets a role by name, failing with `NotFound` when it is missing.
    pub async fn require(&self, name: RoleName) -> DbResult<Role> {
        self.get_by_name(name)
            .await?
            .ok_or_else(|| DbError::not_found("Role", name.as_str()))
    }

    /// Lists all roles ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(roles)
    }

    /// Inserts the role if it does not exist yet and returns the stored row.
    pub async fn ensure(&self, name: RoleName, now: DateTime<Utc>) -> DbResult<Role> {
        let inserted = sqlx::query(
            "INSERT INTO roles (name, created_at) VALUES (?1, ?2) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        debug!(role = %name, inserted = inserted > 0, "Ensured role");

        self.require(name).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use chrono::Utc;
    use stockpile_core::RoleName;

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let roles = db.roles();

        let first = roles.ensure(RoleName::Administrator, Utc::now()).await.unwrap();
        let second = roles.ensure(RoleName::Administrator, Utc::now()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(roles.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_role() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.roles().get_by_name(RoleName::User).await.unwrap().is_none());
        assert!(db.roles().require(RoleName::User).await.is_err());
    }
}
