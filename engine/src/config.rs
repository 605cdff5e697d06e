use std::env;

use thiserror::Error;

use crate::app::duplication::AuditPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid PRESERVE_AUDIT_KINDS: {0}")]
    AuditKinds(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Entity kinds whose duplicates keep the original audit metadata
    pub audit_policy: AuditPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            audit_policy: audit_policy_from_env()?,
        })
    }
}

/// Audit policy from `PRESERVE_AUDIT_KINDS`, falling back to the default table
pub fn audit_policy_from_env() -> Result<AuditPolicy, ConfigError> {
    audit_policy_from(env::var("PRESERVE_AUDIT_KINDS").ok())
}

fn audit_policy_from(list: Option<String>) -> Result<AuditPolicy, ConfigError> {
    match list {
        Some(list) => AuditPolicy::parse(&list).map_err(ConfigError::AuditKinds),
        None => Ok(AuditPolicy::default()),
    }
}
