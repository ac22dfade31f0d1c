//! Startup seeding: roles and the first administrator.

use chrono::{DateTime, Utc};
use tracing::info;

use stockpile_db::{seed, Database, DbError};

use crate::auth::{CredentialVault, VaultError};

/// Administrator created on first start.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Seeding errors.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Seeding database failed: {0}")]
    Db(#[from] DbError),

    #[error("Hashing administrator password failed: {0}")]
    Vault(#[from] VaultError),
}

/// Seed roles, then the administrator if none exists. Idempotent.
///
/// The password is only hashed when an administrator is actually created.
pub async fn seed_defaults(
    db: &Database,
    vault: &CredentialVault,
    admin: &AdminSeed,
    now: DateTime<Utc>,
) -> Result<(), BootstrapError> {
    seed::seed_roles(db, now).await?;

    if !seed::needs_admin(db).await? {
        info!("Administrator present, nothing to seed");
        return Ok(());
    }

    let password_hash = vault.hash_blocking(admin.password.clone()).await?;
    seed::seed_admin(db, &admin.name, &admin.email, password_hash, now).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::Params;
    use stockpile_core::RoleName;
    use stockpile_db::DbConfig;

    #[tokio::test]
    async fn test_seed_defaults_twice() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let vault = CredentialVault::new(Params::new(1024, 1, 1, None).unwrap());
        let admin = AdminSeed {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "password".to_string(),
        };

        seed_defaults(&db, &vault, &admin, Utc::now()).await.unwrap();
        seed_defaults(&db, &vault, &admin, Utc::now()).await.unwrap();

        let stored = db.users().get_by_email("admin@example.com").await.unwrap().unwrap();
        assert_eq!(stored.role.name, RoleName::Administrator);
        assert!(vault.verify(&stored.password_hash, "password").unwrap());

        let admin_role = db.roles().require(RoleName::Administrator).await.unwrap();
        assert_eq!(db.users().count_with_role(admin_role.id).await.unwrap(), 1);
    }
}
