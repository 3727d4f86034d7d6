//! Scope 1/2/3 carbon accounting: the CSV-backed emission-factor table, the
//! cascading factor resolver, and the bounded activity x factor calculator.

pub mod calculator;
pub mod filters;
pub mod resolver;
pub mod table;

pub use calculator::{calculate, calculate_raw, CalculationError};
pub use filters::{activities, filter_for, ActivityFilter, TagRule};
pub use resolver::{resolve, selectable_entries, FactorSelection, SelectionPath};
pub use table::{EmissionFactorEntry, FactorTable, FactorTableError};
