//! # User Repository
//!
//! Principals and their stored password digests. Users are always read
//! joined with their role so callers never see a bare `role_id`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockpile_core::{NewUser, Role, RoleName, User};

/// Flat row shape of `users JOIN roles`.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role_id: i64,
    role_name: RoleName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: Role {
                id: row.role_id,
                name: row.role_name,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT
        u.id,
        u.name,
        u.email,
        u.password_hash,
        u.role_id,
        r.name AS role_name,
        u.created_at,
        u.updated_at
    FROM users u
    INNER JOIN roles r ON r.id = u.role_id
"#;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns it with its role.
    ///
    /// ## Errors
    /// * `UniqueViolation` - the email is already registered
    /// * `ForeignKeyViolation` - `role_id` does not exist
    pub async fn insert(&self, user: &NewUser, now: DateTime<Utc>) -> DbResult<User> {
        debug!(email = %user.email, role_id = user.role_id, "Inserting user");

        let id = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &user.email),
            other => other,
        })?
        .last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id.to_string()))
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE u.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    /// Gets a user by exact email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE u.email = ?1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    /// Counts users holding the given role.
    pub async fn count_with_role(&self, role_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role_id = ?1")
            .bind(role_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn setup() -> (Database, Role) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let role = db.roles().ensure(RoleName::User, Utc::now()).await.unwrap();
        (db, role)
    }

    fn new_user(email: &str, role_id: i64) -> NewUser {
        NewUser {
            name: "Jo".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$stub".to_string(),
            role_id,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let (db, role) = setup().await;

        let created = db
            .users()
            .insert(&new_user("jo@example.com", role.id), Utc::now())
            .await
            .unwrap();
        assert_eq!(created.role, role);

        let found = db.users().get_by_email("jo@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$argon2id$v=19$stub");
        assert_eq!(found.role.name, RoleName::User);

        assert!(db.users().get_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let (db, role) = setup().await;
        let user = new_user("dup@example.com", role.id);

        db.users().insert(&user, Utc::now()).await.unwrap();
        let err = db.users().insert(&user, Utc::now()).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unknown_role_is_foreign_key_violation() {
        let (db, _) = setup().await;

        let err = db
            .users()
            .insert(&new_user("x@example.com", 999), Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_count_with_role() {
        let (db, role) = setup().await;
        assert_eq!(db.users().count_with_role(role.id).await.unwrap(), 0);

        db.users()
            .insert(&new_user("a@example.com", role.id), Utc::now())
            .await
            .unwrap();
        assert_eq!(db.users().count_with_role(role.id).await.unwrap(), 1);
    }
}
