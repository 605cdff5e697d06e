//! Audit metadata carried by every persisted entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Who created and last updated a record, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub creator_id: UserId,
    pub updater_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuditStamp {
    /// A fresh stamp attributing both creation and update to `actor` at `at`
    pub fn new(actor: UserId, at: DateTime<Utc>) -> Self {
        Self {
            creator_id: actor,
            updater_id: actor,
            created_at: at,
            updated_at: at,
        }
    }
}
