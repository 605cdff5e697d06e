//! Audit metadata policy
//!
//! Per-kind choice between copying an original's audit stamp verbatim and
//! stamping the duplicate as created by the duplicating user at run time.
//! Folders, materials and attachment references keep their original stamp;
//! everything else gets a new one.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::entities::{AuditStamp, EntityKind, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditMode {
    Preserve,
    Regenerate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditPolicy {
    preserved: BTreeSet<EntityKind>,
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self::preserving([
            EntityKind::MaterialFolder,
            EntityKind::Material,
            EntityKind::AttachmentReference,
        ])
    }
}

impl AuditPolicy {
    /// A policy preserving exactly `kinds`
    pub fn preserving(kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        Self {
            preserved: kinds.into_iter().collect(),
        }
    }

    /// Parse a comma separated list of kind names, e.g. `material,material_folder`
    pub fn parse(list: &str) -> Result<Self, String> {
        let kinds = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<EntityKind>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::preserving(kinds))
    }

    pub fn mode(&self, kind: EntityKind) -> AuditMode {
        if self.preserved.contains(&kind) {
            AuditMode::Preserve
        } else {
            AuditMode::Regenerate
        }
    }

    pub fn preserved_kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.preserved.iter().copied()
    }

    /// The stamp a duplicate of kind `kind` receives
    pub fn stamp(
        &self,
        kind: EntityKind,
        original: &AuditStamp,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> AuditStamp {
        match self.mode(kind) {
            AuditMode::Preserve => *original,
            AuditMode::Regenerate => AuditStamp::new(actor, now),
        }
    }
}
