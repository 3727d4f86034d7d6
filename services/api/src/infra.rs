use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use esg_engine::config::FactorTableConfig;
use esg_engine::error::AppError;
use esg_engine::workflows::assessment::{
    AlertError, AlertPublisher, AssessmentId, AssessmentRecord, AssessmentRepository, GradeAlert,
    RepositoryError,
};
use esg_engine::workflows::emissions::FactorTable;

/// Built-in emission-factor table backing the demo command and any deployment
/// that does not point `APP_FACTOR_TABLE` at its own CSV.
pub(crate) const SAMPLE_FACTOR_TABLE: &str = "\
Category,Separate,Raw Material,Unit,kgCO2eq,State,Scope
Stationary Combustion,Petroleum,Diesel,L,2.68,Liquid,Scope 1
Stationary Combustion,Petroleum,Kerosene,L,2.53,Liquid,Scope 1
Stationary Combustion,Gas Fuels,LNG,kg,2.75,Gas,Scope 1
Stationary Combustion,Coal,Bituminous Coal,kg,2.42,Solid,Scope 1
Mobile Combustion,Petroleum,Gasoline,L,2.18,Liquid,Scope 1
Mobile Combustion,Gas Fuels,LPG,L,1.87,Gas,Scope 1
Purchased Energy,Electricity,Grid Electricity,kWh,0.4781,Energy,Scope 2
Purchased Energy,Heat,District Steam,GJ,60.2,Energy,Scope 2
Upstream Transport,Freight,Road Freight,t-km,0.1108,Service,Scope 3
Waste Treatment,Landfill,Mixed Municipal Waste,kg,0.587,Solid,Scope 3
Waste Treatment,Incineration,Plastic Waste,kg,2.93,Solid,Scope 3
";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) factors: Arc<FactorTable>,
}

/// Loads the configured reference table, falling back to the built-in sample.
pub(crate) fn load_factor_table(config: &FactorTableConfig) -> Result<FactorTable, AppError> {
    match &config.path {
        Some(path) => FactorTable::from_path(path).map_err(AppError::from),
        None => FactorTable::from_reader(SAMPLE_FACTOR_TABLE.as_bytes()).map_err(AppError::from),
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            guard.insert(record.assessment_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.result.is_none())
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<GradeAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: GradeAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<GradeAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
