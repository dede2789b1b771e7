//! Single-slot persistence for the latest plan.
//!
//! The record is flat JSON with camelCase field names and millisecond
//! timestamps. Storage itself sits behind `KeyValueStore`, so the core never
//! touches a file or a browser.

use anyhow::Result;
use std::collections::HashMap;
use tracing::warn;

use crate::planner::AppointmentPlan;

/// Fixed key the latest plan lives under.
pub const PLAN_KEY: &str = "mowaqetak_last";

/// Minimal string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, used by tests and as a scratch slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn to_persistable(plan: &AppointmentPlan) -> Result<String> {
    Ok(serde_json::to_string(plan)?)
}

/// Decode a stored record. Anything unparsable, or a record that breaks the
/// plan invariants (bad coordinates, leave after arrival), is "no plan".
pub fn from_persistable(raw: &str) -> Option<AppointmentPlan> {
    if raw.trim().is_empty() {
        return None;
    }
    let plan = match serde_json::from_str::<AppointmentPlan>(raw) {
        Ok(plan) => plan,
        Err(e) => {
            warn!(error = %e, "ignoring malformed stored plan");
            return None;
        }
    };
    if !plan.origin.is_valid() || !plan.destination.is_valid() || plan.leave_at > plan.arrive_at {
        warn!(
            origin_valid = plan.origin.is_valid(),
            destination_valid = plan.destination.is_valid(),
            "ignoring stored plan that breaks plan invariants"
        );
        return None;
    }
    Some(plan)
}

/// The one plan slot. Saving overwrites; there is no history.
#[derive(Debug)]
pub struct PlanSlot<S> {
    store: S,
}

impl<S: KeyValueStore> PlanSlot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<AppointmentPlan> {
        match self.store.get(PLAN_KEY) {
            Ok(Some(raw)) => from_persistable(&raw),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read stored plan");
                None
            }
        }
    }

    pub fn save(&mut self, plan: &AppointmentPlan) -> Result<()> {
        let encoded = to_persistable(plan)?;
        self.store.set(PLAN_KEY, &encoded)
    }
}
