use std::time::Duration;

use folio_db::PoolSettings;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ADMIN_EMAIL: &str = "admin@folio.local";
const DEFAULT_ADMIN_NAME: &str = "Site Admin";
const DEFAULT_ADMIN_PASSWORD: &str = "change-me-please";

/// Minimum length, in characters, of `SEED_ADMIN_PASSWORD`.
pub const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;

/// Configuration errors. Each names the offending environment variable.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Credentials for the account that authors seeded content.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Seed configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Postgres connection string. Only required when seeding a real database.
    pub database_url: Option<String>,
    pub pool: PoolSettings,
    pub admin: AdminAccount,
}

impl SeedConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default              |
    /// |---------------------------|----------------------|
    /// | `DATABASE_URL`            | none                 |
    /// | `DB_MAX_CONNECTIONS`      | `5`                  |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`                 |
    /// | `SEED_ADMIN_EMAIL`        | `admin@folio.local`  |
    /// | `SEED_ADMIN_NAME`         | `Site Admin`         |
    /// | `SEED_ADMIN_PASSWORD`     | `change-me-please`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let max_connections: u32 =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }
        let acquire_timeout_secs: u64 =
            parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        let admin = AdminAccount {
            email: lookup("SEED_ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.into()),
            display_name: lookup("SEED_ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.into()),
            password: lookup("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into()),
        };
        if admin.password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
            return Err(ConfigError::Invalid {
                var: "SEED_ADMIN_PASSWORD",
                reason: format!("must be at least {MIN_ADMIN_PASSWORD_LENGTH} characters"),
            });
        }

        Ok(Self {
            database_url,
            pool: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            admin,
        })
    }

    /// The database URL, or [`ConfigError::Missing`] when unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<SeedConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SeedConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.pool.max_connections, 5);
        assert_eq!(config.pool.acquire_timeout, Duration::from_secs(10));
        assert_eq!(config.admin.email, "admin@folio.local");
        assert_eq!(config.admin.display_name, "Site Admin");
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/folio"),
            ("DB_MAX_CONNECTIONS", " 2 "),
            ("SEED_ADMIN_EMAIL", "ops@example.com"),
            ("SEED_ADMIN_PASSWORD", "a-much-longer-password"),
        ])
        .unwrap();
        assert_eq!(config.require_database_url().unwrap(), "postgres://localhost/folio");
        assert_eq!(config.pool.max_connections, 2);
        assert_eq!(config.admin.email, "ops@example.com");
    }

    #[test]
    fn blank_database_url_is_missing() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(
            config.require_database_url().unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }

    #[test]
    fn unparsable_number_names_variable() {
        let err = load(&[("DB_ACQUIRE_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "DB_ACQUIRE_TIMEOUT_SECS", .. });
    }

    #[test]
    fn zero_connections_rejected() {
        let err = load(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", .. });
    }

    #[test]
    fn short_admin_password_rejected() {
        let err = load(&[("SEED_ADMIN_PASSWORD", "hunter2")]).unwrap_err();
        assert!(err.to_string().contains("SEED_ADMIN_PASSWORD is invalid"));
    }

    #[test]
    fn admin_password_length_counts_characters() {
        assert!(load(&[("SEED_ADMIN_PASSWORD", "twelve_chars")]).is_ok());
        assert!(load(&[("SEED_ADMIN_PASSWORD", "ünïcödé-pw1")]).is_err());
        assert!(load(&[("SEED_ADMIN_PASSWORD", "ünïcödé-pw12")]).is_ok());
    }
}
