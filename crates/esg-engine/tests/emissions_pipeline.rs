//! End-to-end specification for the carbon-accounting pipeline: parse the
//! reference table from CSV, narrow it with activity filters, resolve a
//! cascading selection, and run the bounded calculation.

use std::io::Cursor;

use rust_decimal::Decimal;

use esg_engine::workflows::emissions::{
    calculate, calculate_raw, resolve, selectable_entries, CalculationError, FactorSelection,
    FactorTable, SelectionPath,
};

const REFERENCE_TABLE: &str = "\
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

fn dec(raw: &str) -> Decimal {
    raw.parse::<Decimal>().expect("decimal literal")
}

fn reference_table() -> FactorTable {
    FactorTable::from_reader(Cursor::new(REFERENCE_TABLE)).expect("reference table parses")
}

#[test]
fn table_loads_every_row_once() {
    let table = reference_table();
    assert_eq!(table.len(), 11);
    assert_eq!(
        table.categories(),
        vec![
            "Stationary Combustion",
            "Mobile Combustion",
            "Purchased Energy",
            "Upstream Transport",
            "Waste Treatment",
        ]
    );
}

#[test]
fn activity_filters_narrow_each_calculator_screen() {
    let table = reference_table();

    let stationary = selectable_entries("stationary_combustion", &table);
    assert_eq!(stationary.len(), 6);
    assert!(stationary.iter().all(|entry| entry.scope == "Scope 1"));

    // mobile combustion keeps liquid and gaseous scope-1 fuels only
    let mobile = selectable_entries("mobile_combustion", &table);
    assert_eq!(mobile.len(), 5);
    assert!(mobile.iter().all(|entry| entry.state != "Solid"));

    let energy = selectable_entries("purchased_energy", &table);
    assert_eq!(energy.len(), 2);
    assert!(energy.iter().all(|entry| entry.scope == "Scope 2"));

    let logistics = selectable_entries("upstream_logistics", &table);
    assert_eq!(logistics.len(), 1);
    assert_eq!(logistics[0].raw_material, "Road Freight");

    let waste = selectable_entries("waste_treatment", &table);
    assert_eq!(waste.len(), 2);
    assert!(waste.iter().all(|entry| entry.separate != "Freight"));
}

#[test]
fn cascading_selection_resolves_unit_and_factor() {
    let table = reference_table();
    let mut selection = FactorSelection::new();

    selection.select_category("Purchased Energy");
    assert_eq!(
        table.separates_for("Purchased Energy"),
        vec!["Electricity", "Heat"]
    );

    selection.select_separate("Electricity");
    assert_eq!(
        table.materials_for("Purchased Energy", "Electricity"),
        vec!["Grid Electricity"]
    );

    selection.select_material("Grid Electricity", &table);
    assert_eq!(selection.unit(), Some("kWh"));
    assert_eq!(selection.factor(), Some(dec("0.4781")));

    // switching category mid-flow drops everything below it
    selection.select_category("Waste Treatment");
    assert!(selection.separate().is_none());
    assert!(selection.factor().is_none());
}

#[test]
fn resolution_miss_is_recoverable_not_fatal() {
    let table = reference_table();
    let miss = resolve(
        &SelectionPath {
            category: "Purchased Energy".to_string(),
            separate: "Electricity".to_string(),
            raw_material: "Diesel".to_string(),
        },
        &table,
    );
    assert!(miss.is_none());
}

#[test]
fn resolved_factor_feeds_the_bounded_calculation() {
    let table = reference_table();
    let entry = resolve(
        &SelectionPath {
            category: "Stationary Combustion".to_string(),
            separate: "Petroleum".to_string(),
            raw_material: "Diesel".to_string(),
        },
        &table,
    )
    .expect("diesel resolves");

    let total = calculate(dec("1500"), entry.kg_co2eq).expect("calculates");
    assert_eq!(total, dec("4020.000000"));
    assert_eq!(total.to_string(), "4020.000000");
}

#[test]
fn form_strings_run_the_same_path_as_numbers() {
    let total = calculate_raw("1000", "2.5").expect("calculates");
    assert_eq!(total, dec("2500.000000"));

    assert!(matches!(
        calculate_raw("abc", "2.5"),
        Err(CalculationError::NotANumber { .. })
    ));
}

#[test]
fn oversized_product_is_rejected_end_to_end() {
    let error = calculate(dec("999999999999.999"), dec("999999999.999999"))
        .expect_err("product exceeds 15 integer digits");
    assert_eq!(error, CalculationError::ResultOutOfRange);
}
