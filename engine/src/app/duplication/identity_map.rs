//! Identity map
//!
//! Run-scoped table from `(kind, original id)` to the id of the duplicate.
//! Every reference inside the new aggregate is resolved through it, so a
//! duplicated child can only ever point at a duplicated parent.
//!
//! A kind is *sealed* once the phase producing it has finished. Later
//! phases check seals to prove the entities they depend on are complete.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::domain::entities::{EntityId, EntityKind, EntityRef};
use crate::error::DuplicationError;

#[derive(Debug, Default)]
pub struct IdentityMap {
    entries: HashMap<(EntityKind, Uuid), Uuid>,
    sealed: BTreeSet<EntityKind>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the duplicate of `original`
    ///
    /// Each original is duplicated exactly once per run; a second `put` for
    /// the same original, or a `put` into a sealed kind, is an internal error.
    pub fn put<I: EntityId>(&mut self, original: I, duplicate: I) -> Result<(), DuplicationError> {
        if self.sealed.contains(&I::KIND) {
            return Err(DuplicationError::Internal(format!(
                "{} {} registered after its phase completed",
                I::KIND,
                original
            )));
        }

        match self.entries.entry((I::KIND, original.as_uuid())) {
            Entry::Occupied(_) => Err(DuplicationError::Internal(format!(
                "{} {} duplicated twice in one run",
                I::KIND,
                original
            ))),
            Entry::Vacant(slot) => {
                slot.insert(duplicate.as_uuid());
                Ok(())
            }
        }
    }

    pub fn get<I: EntityId>(&self, original: I) -> Option<I> {
        self.entries
            .get(&(I::KIND, original.as_uuid()))
            .map(|id| I::from_uuid(*id))
    }

    /// Resolve an untyped reference to its duplicate
    pub fn resolve(&self, original: EntityRef) -> Option<EntityRef> {
        self.entries
            .get(&(original.kind, original.id))
            .map(|id| EntityRef {
                kind: original.kind,
                id: *id,
            })
    }

    /// Resolve `original` on behalf of `dependent`, failing if it has no duplicate
    pub fn require<I: EntityId>(
        &self,
        dependent: EntityRef,
        original: I,
    ) -> Result<I, DuplicationError> {
        self.get(original)
            .ok_or(DuplicationError::UnresolvedDependency {
                dependent,
                missing: original.entity_ref(),
            })
    }

    pub fn seal(&mut self, kind: EntityKind) {
        self.sealed.insert(kind);
    }

    pub fn is_sealed(&self, kind: EntityKind) -> bool {
        self.sealed.contains(&kind)
    }

    /// Number of duplicates recorded for `kind`
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entries.keys().filter(|(k, _)| *k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
