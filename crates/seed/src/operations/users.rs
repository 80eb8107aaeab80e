use std::sync::Arc;

use anyhow::{anyhow, Context};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use folio_core::validation::validate_batch;
use folio_db::models::user::{NewUser, ROLE_ADMIN};
use folio_db::store::{DataStore, Entity};

use super::clear_entity;
use crate::config::AdminAccount;
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig =
    OperationConfig::new("users", 10, "Admin account that authors seeded content");

/// Creates the admin author. The password is hashed before it reaches the store.
pub struct SeedUsers {
    store: Arc<dyn DataStore>,
    admin: AdminAccount,
}

impl SeedUsers {
    pub fn new(store: Arc<dyn DataStore>, admin: AdminAccount) -> Self {
        Self { store, admin }
    }
}

#[async_trait]
impl Operation for SeedUsers {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let password_hash = hash_admin_password(&self.admin.password)?;

        let rows = vec![NewUser {
            email: self.admin.email.clone(),
            display_name: self.admin.display_name.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        }];
        validate_batch("user", &rows)?;

        let created = self
            .store
            .insert_users(&rows)
            .await
            .context("failed to insert users")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::User).await
    }
}

/// Argon2id PHC string for the admin password, with a fresh salt each run.
fn hash_admin_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash admin password: {e}"))
}
