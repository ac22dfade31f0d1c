//! # Seed Data
//!
//! Startup seeding: the fixed role set and a first administrator.
//! Both steps are idempotent and safe to run on every boot.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use stockpile_core::{NewUser, Role, RoleName, User};

/// Inserts every [`RoleName`] that is not stored yet.
pub async fn seed_roles(db: &Database, now: DateTime<Utc>) -> DbResult<Vec<Role>> {
    let mut roles = Vec::with_capacity(RoleName::ALL.len());
    for name in RoleName::ALL {
        roles.push(db.roles().ensure(name, now).await?);
    }

    info!(count = roles.len(), "Roles seeded");
    Ok(roles)
}

/// Returns true when no user holds the Administrator role.
pub async fn needs_admin(db: &Database) -> DbResult<bool> {
    let admin = db.roles().require(RoleName::Administrator).await?;
    Ok(db.users().count_with_role(admin.id).await? == 0)
}

/// Creates the first administrator unless one already exists.
///
/// `password_hash` must already be a vault digest. Returns the created user,
/// or `None` when an administrator was already present.
pub async fn seed_admin(
    db: &Database,
    name: &str,
    email: &str,
    password_hash: String,
    now: DateTime<Utc>,
) -> DbResult<Option<User>> {
    if !needs_admin(db).await? {
        info!("Administrator already present, skipping seed");
        return Ok(None);
    }

    let admin_role = db.roles().require(RoleName::Administrator).await?;
    let user = db
        .users()
        .insert(
            &NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role_id: admin_role.id,
            },
            now,
        )
        .await?;

    info!(user_id = user.id, email = %user.email, "Administrator seeded");
    Ok(Some(user))
}
