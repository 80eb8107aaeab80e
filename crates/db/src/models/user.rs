//! Admin and editor accounts that author content.

use folio_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// Full administrative access.
pub const ROLE_ADMIN: &str = "admin";

/// May author and edit content but not manage accounts.
pub const ROLE_EDITOR: &str = "editor";

/// A row from the `users` table. The password hash is never selected.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a user. `password_hash` must already be a PHC string.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    #[validate(length(min = 1))]
    pub password_hash: String,
    #[validate(length(min = 1))]
    pub role: String,
}
