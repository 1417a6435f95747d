//! The target registry - an explicit alias namespace.
//!
//! Build tools register aliases into an ambient global namespace; here
//! the namespace is a value the caller owns and passes in, so a
//! resolution pass can be inspected and repeated in tests. Publishing
//! only ever adds entries; existing targets are never renamed or
//! removed.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::core::target::TargetName;

/// One published alias: a short name pointing at a real link-target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    /// The alias name
    pub name: TargetName,

    /// The target it resolves to
    pub target: TargetName,
}

/// Error for an alias name that is already taken by a different target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("alias `{alias}` already points at `{existing}`, refusing to redefine it as `{requested}`")]
pub struct AliasConflict {
    pub alias: TargetName,
    pub existing: TargetName,
    pub requested: TargetName,
}

/// Outcome of publishing a single alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The alias was newly added.
    Added,

    /// The identical alias already existed; nothing changed.
    Unchanged,
}

/// An ordered registry of published aliases.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    aliases: Vec<Alias>,
    index: HashMap<TargetName, usize>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TargetRegistry::default()
    }

    /// Publish an alias.
    ///
    /// Re-publishing the identical mapping is a no-op; publishing the
    /// same alias name with a different target is a conflict.
    pub fn publish(
        &mut self,
        name: TargetName,
        target: TargetName,
    ) -> Result<PublishOutcome, AliasConflict> {
        if let Some(&i) = self.index.get(&name) {
            let existing = &self.aliases[i].target;
            if *existing == target {
                return Ok(PublishOutcome::Unchanged);
            }
            return Err(AliasConflict {
                alias: name,
                existing: existing.clone(),
                requested: target,
            });
        }

        tracing::debug!("alias {} -> {}", name, target);
        self.index.insert(name.clone(), self.aliases.len());
        self.aliases.push(Alias { name, target });
        Ok(PublishOutcome::Added)
    }

    /// Resolve an alias to its underlying target.
    pub fn resolve(&self, name: &TargetName) -> Option<&TargetName> {
        self.index.get(name).map(|&i| &self.aliases[i].target)
    }

    /// All published aliases, in publication order.
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// Number of published aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether no alias has been published yet.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
