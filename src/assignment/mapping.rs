//! Per-day assignment configuration: which employees cover which service
//! category, in priority order.
//!
//! The mapping is persisted in the operator's local storage under a key
//! derived from an injected as-of date, so a new key takes effect each
//! calendar day and configurations never roll over.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::EmployeeId;
use crate::store::LocalStorage;

const KEY_PREFIX: &str = "service_mapping_";

/// Storage key for a given calendar day, e.g. `service_mapping_2026-08-27`.
pub fn storage_key(as_of: NaiveDate) -> String {
    format!("{}{}", KEY_PREFIX, as_of.format("%Y-%m-%d"))
}

/// Mapping from service category to an ordered employee list.
///
/// List order is assignment priority order. A category with an empty list
/// is kept, not pruned; the distributor skips it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceMapping {
    categories: HashMap<String, Vec<EmployeeId>>,
}

impl ServiceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &String> {
        self.categories.keys()
    }

    pub fn employees_for(&self, category: &str) -> Option<&[EmployeeId]> {
        self.categories.get(category).map(|v| v.as_slice())
    }

    pub fn set_category(&mut self, category: impl Into<String>, employees: Vec<EmployeeId>) {
        self.categories.insert(category.into(), employees);
    }

    /// Remove the employee from the category's list if present, otherwise
    /// append it at the end. No eligibility check happens here; the caller
    /// is responsible for only offering eligible employees.
    pub fn toggle_employee(&mut self, category: &str, employee: EmployeeId) {
        let list = self.categories.entry(category.to_string()).or_default();
        if let Some(pos) = list.iter().position(|id| *id == employee) {
            list.remove(pos);
        } else {
            list.push(employee);
        }
    }

    /// Keep only employees for which `eligible` holds, preserving order.
    /// Categories are retained even when filtering empties their list.
    pub fn retain_eligible(&self, eligible: impl Fn(&EmployeeId) -> bool) -> ServiceMapping {
        let categories = self
            .categories
            .iter()
            .map(|(category, list)| {
                let kept = list.iter().copied().filter(|id| eligible(id)).collect();
                (category.clone(), kept)
            })
            .collect();
        ServiceMapping { categories }
    }
}

/// Read the stored mapping for the given day.
///
/// Returns `None` when the key is absent or the stored value does not
/// parse; a corrupt value is treated as absent, not as an error.
pub fn stored_mapping(storage: &dyn LocalStorage, as_of: NaiveDate) -> Option<ServiceMapping> {
    let raw = storage.get(&storage_key(as_of))?;
    match serde_json::from_str(&raw) {
        Ok(mapping) => Some(mapping),
        Err(error) => {
            tracing::warn!(%as_of, %error, "Stored service mapping is corrupt, treating as absent");
            None
        }
    }
}

/// Stateful manager for the operator's in-progress mapping edits.
pub struct MappingManager {
    storage: Arc<dyn LocalStorage>,
    as_of: NaiveDate,
    mapping: ServiceMapping,
}

impl MappingManager {
    pub fn new(storage: Arc<dyn LocalStorage>, as_of: NaiveDate) -> Self {
        Self {
            storage,
            as_of,
            mapping: ServiceMapping::new(),
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn mapping(&self) -> &ServiceMapping {
        &self.mapping
    }

    pub fn toggle_employee(&mut self, category: &str, employee: EmployeeId) {
        self.mapping.toggle_employee(category, employee);
    }

    pub fn set_category(&mut self, category: impl Into<String>, employees: Vec<EmployeeId>) {
        self.mapping.set_category(category, employees);
    }

    /// Serialize the full mapping and overwrite today's key.
    ///
    /// On a storage failure the error is returned and the in-memory
    /// mapping is left unchanged so the operator can retry.
    pub fn save(&self) -> Result<()> {
        let value = serde_json::to_string(&self.mapping)
            .expect("service mapping always serializes to JSON");
        self.storage.set(&storage_key(self.as_of), &value)?;
        tracing::info!(as_of = %self.as_of, categories = self.mapping.categories.len(), "Service mapping saved");
        Ok(())
    }

    /// Replace the in-memory mapping with the stored one; absent or
    /// corrupt values load as an empty mapping.
    pub fn load(&mut self) {
        self.mapping = stored_mapping(self.storage.as_ref(), self.as_of).unwrap_or_default();
    }

    /// Delete today's key and reset the in-memory mapping.
    pub fn clear(&mut self) {
        self.storage.remove(&storage_key(self.as_of));
        self.mapping = ServiceMapping::new();
        tracing::info!(as_of = %self.as_of, "Service mapping cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn storage_key_embeds_iso_date() {
        assert_eq!(
            storage_key(day(2026, 8, 27)),
            "service_mapping_2026-08-27"
        );
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut mapping = ServiceMapping::new();
        let a = EmployeeId::new();
        let b = EmployeeId::new();

        mapping.toggle_employee("SEO", a);
        mapping.toggle_employee("SEO", b);
        assert_eq!(mapping.employees_for("SEO"), Some([a, b].as_slice()));

        mapping.toggle_employee("SEO", a);
        assert_eq!(mapping.employees_for("SEO"), Some([b].as_slice()));
    }

    #[test]
    fn emptied_category_is_retained() {
        let mut mapping = ServiceMapping::new();
        let a = EmployeeId::new();
        mapping.toggle_employee("SEO", a);
        mapping.toggle_employee("SEO", a);

        assert!(!mapping.is_empty());
        assert_eq!(mapping.employees_for("SEO"), Some([].as_slice()));
    }

    #[test]
    fn retain_eligible_preserves_order() {
        let mut mapping = ServiceMapping::new();
        let a = EmployeeId::new();
        let b = EmployeeId::new();
        let c = EmployeeId::new();
        mapping.set_category("SEO", vec![a, b, c]);

        let filtered = mapping.retain_eligible(|id| *id != b);
        assert_eq!(filtered.employees_for("SEO"), Some([a, c].as_slice()));
    }
}
