//! Plan Cache
//!
//! Fingerprint -> validated plan. Values go in and come out as owned clones, so
//! a caller mutating its copy can never reach the stored entry or another
//! caller's copy. The cache itself is not synchronized; the orchestrator owns
//! it behind its state lock.
//!
//! There is no eviction: the map grows for the lifetime of the orchestrator.

use crate::plan::Plan;
use crate::types::Fingerprint;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PlanCache {
    entries: HashMap<Fingerprint, Plan>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy of the cached plan, if any.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Plan> {
        self.entries.get(fingerprint).cloned()
    }

    /// Store an independent copy of `plan`, replacing any previous entry.
    pub fn put(&mut self, fingerprint: Fingerprint, plan: &Plan) {
        self.entries.insert(fingerprint, plan.clone());
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
