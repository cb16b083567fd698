#![deny(unsafe_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use udf_model::SpecialType;

use crate::error::RegistryError;

/// What happens when a value is registered a second time with a different name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Replace the existing entry without comment.
    Overwrite,
    /// Replace the existing entry and emit a warning.
    #[default]
    Warn,
    /// Refuse the whole batch and keep the registry unchanged.
    Reject,
}

/// Outcome of one `register` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSummary {
    /// New values added.
    pub added: usize,
    /// Existing values whose name was replaced.
    pub replaced: usize,
    /// Entries identical to what was already registered.
    pub unchanged: usize,
}

/// Lookup table for special types, keyed by numeric value.
///
/// Built once at start-up and passed by reference to whoever needs it;
/// `clear` exists for tests and explicit resets.
#[derive(Debug, Clone, Default)]
pub struct SpecialTypeRegistry {
    policy: CollisionPolicy,
    by_value: HashMap<u32, SpecialType>,
    /// Registration order of values, for `get_all`.
    order: Vec<u32>,
}

impl SpecialTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a registry from a start-up list.
    pub fn from_types<I>(policy: CollisionPolicy, types: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = SpecialType>,
    {
        let mut registry = Self::with_policy(policy);
        registry.register(types)?;
        Ok(registry)
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Register a batch of special types.
    ///
    /// Identical re-registrations are no-ops. Under [`CollisionPolicy::Reject`]
    /// the batch is checked before anything is inserted.
    pub fn register<I>(&mut self, types: I) -> Result<RegisterSummary, RegistryError>
    where
        I: IntoIterator<Item = SpecialType>,
    {
        let types: Vec<SpecialType> = types.into_iter().collect();
        if self.policy == CollisionPolicy::Reject {
            self.check_collisions(&types)?;
        }

        let mut summary = RegisterSummary::default();
        for special in types {
            match self.by_value.get(&special.value) {
                Some(existing) if existing.name == special.name => summary.unchanged += 1,
                Some(existing) => {
                    if self.policy == CollisionPolicy::Warn {
                        warn!(
                            value = special.value,
                            existing = %existing.name,
                            incoming = %special.name,
                            "special type re-registered with a different name"
                        );
                    }
                    summary.replaced += 1;
                    self.by_value.insert(special.value, special);
                }
                None => {
                    summary.added += 1;
                    self.order.push(special.value);
                    self.by_value.insert(special.value, special);
                }
            }
        }
        debug!(
            added = summary.added,
            replaced = summary.replaced,
            unchanged = summary.unchanged,
            total = self.by_value.len(),
            "registered special types"
        );
        Ok(summary)
    }

    fn check_collisions(&self, types: &[SpecialType]) -> Result<(), RegistryError> {
        let mut batch: HashMap<u32, &str> = HashMap::new();
        for special in types {
            let existing = self
                .by_value
                .get(&special.value)
                .map(|existing| existing.name.as_str())
                .or_else(|| batch.get(&special.value).copied());
            if let Some(existing) = existing
                && existing != special.name
            {
                return Err(RegistryError::Collision {
                    value: special.value,
                    existing: existing.to_string(),
                    incoming: special.name.clone(),
                });
            }
            batch.insert(special.value, special.name.as_str());
        }
        Ok(())
    }

    pub fn get_by_value(&self, value: u32) -> Option<&SpecialType> {
        self.by_value.get(&value)
    }

    /// Linear scan by exact name.
    pub fn get_by_name(&self, name: &str) -> Option<&SpecialType> {
        self.order
            .iter()
            .filter_map(|value| self.by_value.get(value))
            .find(|special| special.name == name)
    }

    pub fn has(&self, value: u32) -> bool {
        self.by_value.contains_key(&value)
    }

    /// All registered types in registration order.
    pub fn get_all(&self) -> Vec<&SpecialType> {
        self.order
            .iter()
            .filter_map(|value| self.by_value.get(value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_value.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_value.clear();
        self.order.clear();
    }
}
