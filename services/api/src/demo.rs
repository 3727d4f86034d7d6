use crate::infra::{load_factor_table, InMemoryAlertPublisher, InMemoryAssessmentRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use esg_engine::config::FactorTableConfig;
use esg_engine::error::AppError;
use esg_engine::workflows::assessment::report::views::ViolationReportSummary;
use esg_engine::workflows::assessment::{
    AssessmentScorer, AssessmentService, AssessmentSubmission, QuestionCatalog, ViolationReport,
};
use esg_engine::workflows::emissions::{calculate, resolve, SelectionPath};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file mapping question ids to raw answers (e.g. {"1.1": "yes"})
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Company name attached to the rendered report
    #[arg(long, default_value = "demo-supplier")]
    pub(crate) company: String,
    /// Report date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
    /// Page size for the critical-violation report pages
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Activity amount (up to 12 integer digits and 3 decimal places)
    #[arg(long)]
    pub(crate) activity_amount: String,
    /// Emission factor in kgCO2eq per unit; mutually exclusive with a lookup path
    #[arg(long)]
    pub(crate) factor: Option<String>,
    /// Lookup path: reference-table category
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Lookup path: reference-table subcategory
    #[arg(long)]
    pub(crate) separate: Option<String>,
    /// Lookup path: reference-table raw material
    #[arg(long)]
    pub(crate) material: Option<String>,
    /// Alternative emission-factor CSV (defaults to the built-in sample table)
    #[arg(long)]
    pub(crate) table: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Report date for the demo output (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
    /// Skip the emission accounting portion of the demo
    #[arg(long)]
    pub(crate) skip_emissions: bool,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        company,
        assessed_on,
        page_size,
    } = args;

    let file = std::fs::File::open(answers)?;
    let raw: serde_json::Value =
        serde_json::from_reader(file).map_err(|err| AppError::Io(err.into()))?;
    let raw_answers = raw
        .as_object()
        .cloned()
        .unwrap_or_else(serde_json::Map::new);

    let scorer = AssessmentScorer::new(QuestionCatalog::standard());
    let normalized = scorer
        .normalize(&raw_answers)
        .map_err(|err| AppError::Assessment(err.into()))?;
    let result = scorer
        .score(&normalized)
        .map_err(|err| AppError::Assessment(err.into()))?;

    let assessed_on = assessed_on.unwrap_or_else(|| Local::now().date_naive());
    let report = ViolationReport::from_result(&result);
    let summary = report.summary(assessed_on);

    println!("Self-assessment report for {company}");
    render_violation_report(&summary);

    if let Some(page_size) = page_size {
        let pages = summary.critical_pages(page_size).map_err(AppError::from)?;
        if pages.is_empty() {
            println!("\nCritical violation pages: none");
        } else {
            println!("\nCritical violation pages (page size {page_size})");
            for (index, page) in pages.iter().enumerate() {
                println!("  Page {}", index + 1);
                for entry in page {
                    println!(
                        "    - {} [{}] grade ceiling {}",
                        entry.question_id,
                        entry.category_label,
                        entry.critical_grade_label.unwrap_or("-")
                    );
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs {
        activity_amount,
        factor,
        category,
        separate,
        material,
        table,
    } = args;

    let table = load_factor_table(&FactorTableConfig { path: table })?;

    let (unit, resolved_factor) = match (category, separate, material) {
        (Some(category), Some(separate), Some(raw_material)) => {
            let path = SelectionPath {
                category,
                separate,
                raw_material,
            };
            match resolve(&path, &table) {
                Some(entry) => (Some(entry.unit.clone()), entry.kg_co2eq),
                None => {
                    println!(
                        "No factor found for {} / {} / {}; unit and factor cleared",
                        path.category, path.separate, path.raw_material
                    );
                    return Ok(());
                }
            }
        }
        _ => match factor {
            Some(raw) => {
                let parsed = raw.trim().parse().map_err(|_| {
                    AppError::Calculation(
                        esg_engine::workflows::emissions::CalculationError::NotANumber { raw },
                    )
                })?;
                (None, parsed)
            }
            None => {
                println!("Provide either --factor or the full --category/--separate/--material path");
                return Ok(());
            }
        },
    };

    let activity = activity_amount.trim().parse().map_err(|_| {
        AppError::Calculation(esg_engine::workflows::emissions::CalculationError::NotANumber {
            raw: activity_amount.clone(),
        })
    })?;
    let total = calculate(activity, resolved_factor)?;

    match unit {
        Some(unit) => println!(
            "{} {} x {} kgCO2eq/{} = {} kgCO2eq",
            activity_amount.trim(),
            unit,
            resolved_factor,
            unit,
            total
        ),
        None => println!(
            "{} x {} = {} kgCO2eq",
            activity_amount.trim(),
            resolved_factor,
            total
        ),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        assessed_on,
        skip_emissions,
    } = args;

    let assessed_on = assessed_on.unwrap_or_else(|| Local::now().date_naive());

    println!("Supplier ESG due-diligence demo");

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = Arc::new(AssessmentService::new(
        repository,
        alerts.clone(),
        QuestionCatalog::standard(),
    ));

    let submission = demo_submission();
    let record = match service.submit(submission) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    let public_view = record.status_view();
    println!(
        "- Received assessment {} from {} -> status {}",
        public_view.assessment_id.0, public_view.company, public_view.status
    );

    let result = match service.score(&record.assessment_id) {
        Ok(result) => result,
        Err(err) => {
            println!("  Scoring unavailable: {}", err);
            return Ok(());
        }
    };
    println!(
        "  Final grade {} | weighted score {}% ({}/{} points)",
        result.final_grade.label(),
        result.score,
        result.actual_score,
        result.total_possible_score
    );
    println!("  Category breakdown:");
    for category in &result.category_scores {
        println!(
            "    - {}: {}% compliant, grade score {}",
            category.category_label, category.compliance_rate, category.grade_points
        );
    }

    let report = ViolationReport::from_result(&result);
    let summary = report.summary(assessed_on);
    render_violation_report(&summary);

    let events = alerts.events();
    if events.is_empty() {
        println!("  External alerts: none dispatched");
    } else {
        println!("  External alerts:");
        for alert in events {
            println!("    - template={} -> {}", alert.template, alert.assessment_id.0);
        }
    }

    if skip_emissions {
        return Ok(());
    }

    println!("\nEmission accounting demo");
    let table = load_factor_table(&FactorTableConfig { path: None })?;
    let path = SelectionPath {
        category: "Stationary Combustion".to_string(),
        separate: "Petroleum".to_string(),
        raw_material: "Diesel".to_string(),
    };
    match resolve(&path, &table) {
        Some(entry) => {
            let total = calculate("1500".parse().expect("literal"), entry.kg_co2eq)?;
            println!(
                "- 1500 {} of {} at {} kgCO2eq/{} = {} kgCO2eq",
                entry.unit, entry.raw_material, entry.kg_co2eq, entry.unit, total
            );
        }
        None => println!("- Demo factor missing from the reference table"),
    }

    Ok(())
}

fn demo_submission() -> AssessmentSubmission {
    let answers = serde_json::json!({
        "1.1": "yes",
        "1.2": "yes",
        "1.3": "yes",
        "1.4": "yes",
        "2.1": "no",
        "2.2": "yes",
        "2.3": "partial",
        "3.1": "yes",
        "3.2": "yes",
        "4.1": "yes",
        "4.2": "partial",
        "5.1": "yes",
        "5.3": "yes",
    });

    AssessmentSubmission {
        company: "Hanbit Metals Co.".to_string(),
        answers: answers.as_object().cloned().unwrap_or_default(),
    }
}

pub(crate) fn render_violation_report(summary: &ViolationReportSummary) {
    println!(
        "\nViolation report (assessed {}): grade {} | score {}% | {}/{} weighted points",
        summary.assessed_on,
        summary.final_grade_label,
        summary.score,
        summary.actual_score,
        summary.total_possible_score
    );
    println!(
        "Violations: {} total, {} critical",
        summary.total_violations, summary.critical_violations
    );

    if summary.categories.is_empty() {
        println!("No violations recorded");
        return;
    }

    for category in &summary.categories {
        println!(
            "- {}: {} violation(s), {} critical",
            category.category_label, category.total, category.critical
        );
        for entry in &category.entries {
            match entry.critical_grade_label {
                Some(grade) => println!("    {} (critical, grade ceiling {})", entry.question_id, grade),
                None => println!("    {}", entry.question_id),
            }
        }
    }
}
