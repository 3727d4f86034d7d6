use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the emission-factor reference table: a three-level lookup path
/// plus the unit, the factor, and the tags the activity filters act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionFactorEntry {
    pub category: String,
    pub separate: String,
    pub raw_material: String,
    pub unit: String,
    pub kg_co2eq: Decimal,
    pub state: String,
    pub scope: String,
}

#[derive(Debug)]
pub enum FactorTableError {
    Io(std::io::Error),
    Csv(csv::Error),
    Factor { row: usize, raw: String },
}

impl std::fmt::Display for FactorTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactorTableError::Io(err) => write!(f, "failed to read factor table: {}", err),
            FactorTableError::Csv(err) => write!(f, "invalid factor table CSV data: {}", err),
            FactorTableError::Factor { row, raw } => write!(
                f,
                "row {}: '{}' is not a valid non-negative emission factor",
                row, raw
            ),
        }
    }
}

impl std::error::Error for FactorTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FactorTableError::Io(err) => Some(err),
            FactorTableError::Csv(err) => Some(err),
            FactorTableError::Factor { .. } => None,
        }
    }
}

impl From<std::io::Error> for FactorTableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FactorTableError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct FactorRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Separate")]
    separate: String,
    #[serde(rename = "Raw Material")]
    raw_material: String,
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "kgCO2eq")]
    kg_co2eq: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Scope", default)]
    scope: String,
}

/// Immutable in-memory copy of the reference table, parsed once at startup.
#[derive(Debug, Clone)]
pub struct FactorTable {
    entries: Vec<EmissionFactorEntry>,
}

impl FactorTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FactorTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FactorTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<FactorRow>().enumerate() {
            let row = record?;
            let factor = row
                .kg_co2eq
                .parse::<Decimal>()
                .ok()
                .filter(|value| !value.is_sign_negative())
                .ok_or_else(|| FactorTableError::Factor {
                    // header occupies the first line
                    row: index + 2,
                    raw: row.kg_co2eq.clone(),
                })?;

            entries.push(EmissionFactorEntry {
                category: row.category,
                separate: row.separate,
                raw_material: row.raw_material,
                unit: row.unit,
                kg_co2eq: factor,
                state: row.state,
                scope: row.scope,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[EmissionFactorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        dedup_in_order(self.entries.iter().map(|entry| entry.category.as_str()))
    }

    /// Distinct subcategories available under a category.
    pub fn separates_for(&self, category: &str) -> Vec<&str> {
        dedup_in_order(
            self.entries
                .iter()
                .filter(|entry| entry.category == category)
                .map(|entry| entry.separate.as_str()),
        )
    }

    /// Distinct materials available under a category/subcategory pair.
    pub fn materials_for(&self, category: &str, separate: &str) -> Vec<&str> {
        dedup_in_order(
            self.entries
                .iter()
                .filter(|entry| entry.category == category && entry.separate == separate)
                .map(|entry| entry.raw_material.as_str()),
        )
    }
}

fn dedup_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    let mut ordered = Vec::new();
    for value in values {
        if seen.insert(value) {
            ordered.push(value);
        }
    }
    ordered
}
