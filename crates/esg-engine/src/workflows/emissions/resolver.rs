use rust_decimal::Decimal;
use serde::Deserialize;

use super::filters::filter_for;
use super::table::{EmissionFactorEntry, FactorTable};

/// Fully-specified three-level lookup path into the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectionPath {
    pub category: String,
    pub separate: String,
    pub raw_material: String,
}

/// Resolves a selection path against the table. Exact, case-sensitive match
/// on all three keys; `None` is the expected mid-selection outcome, not an
/// error.
pub fn resolve<'a>(
    path: &SelectionPath,
    table: &'a FactorTable,
) -> Option<&'a EmissionFactorEntry> {
    table.entries().iter().find(|entry| {
        entry.category == path.category
            && entry.separate == path.separate
            && entry.raw_material == path.raw_material
    })
}

/// Rows of the table selectable for a calculator activity, after the
/// declarative tag filters. An unregistered activity sees the whole table.
pub fn selectable_entries<'a>(
    activity: &str,
    table: &'a FactorTable,
) -> Vec<&'a EmissionFactorEntry> {
    match filter_for(activity) {
        Some(filter) => table
            .entries()
            .iter()
            .filter(|entry| filter.matches(entry))
            .collect(),
        None => table.entries().iter().collect(),
    }
}

/// Cascading selector state backing the category → subcategory → material
/// pickers. Changing a parent level always invalidates every child level and
/// the resolved factor.
#[derive(Debug, Default, Clone)]
pub struct FactorSelection {
    category: Option<String>,
    separate: Option<String>,
    raw_material: Option<String>,
    resolved: Option<EmissionFactorEntry>,
}

impl FactorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn separate(&self) -> Option<&str> {
        self.separate.as_deref()
    }

    pub fn raw_material(&self) -> Option<&str> {
        self.raw_material.as_deref()
    }

    /// The resolved table row, when the full path matched one.
    pub fn resolved(&self) -> Option<&EmissionFactorEntry> {
        self.resolved.as_ref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.resolved.as_ref().map(|entry| entry.unit.as_str())
    }

    pub fn factor(&self) -> Option<Decimal> {
        self.resolved.as_ref().map(|entry| entry.kg_co2eq)
    }

    pub fn select_category(&mut self, category: &str) {
        self.category = Some(category.to_string());
        self.separate = None;
        self.raw_material = None;
        self.resolved = None;
    }

    pub fn select_separate(&mut self, separate: &str) {
        self.separate = Some(separate.to_string());
        self.raw_material = None;
        self.resolved = None;
    }

    /// Completes the path and attempts resolution. A miss clears the resolved
    /// factor so the caller blanks the unit/factor fields.
    pub fn select_material(&mut self, raw_material: &str, table: &FactorTable) {
        self.raw_material = Some(raw_material.to_string());
        self.resolved = match (&self.category, &self.separate) {
            (Some(category), Some(separate)) => resolve(
                &SelectionPath {
                    category: category.clone(),
                    separate: separate.clone(),
                    raw_material: raw_material.to_string(),
                },
                table,
            )
            .cloned(),
            _ => None,
        };
    }
}
