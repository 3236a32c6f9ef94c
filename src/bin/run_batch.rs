//! Assess every applicant in a batch CSV
//!
//! Outputs one row per applicant with the headline eligibility figures

use anyhow::{Context, Result};
use clap::Parser;
use loan_eligibility::eligibility::{EligibilityEngine, OverallStatus};
use loan_eligibility::profile::{load_applicants, loader::DEFAULT_PROFILES_PATH};
use loan_eligibility::UnderwritingPolicy;
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch")]
#[command(about = "Run eligibility assessments for a batch of applicants", long_about = None)]
struct Cli {
    /// Applicants CSV
    #[arg(short, long, default_value = DEFAULT_PROFILES_PATH)]
    input: PathBuf,

    /// Output CSV
    #[arg(short, long, default_value = "eligibility_output.csv")]
    output: PathBuf,

    /// Directory holding rate_bands.csv and credit_multipliers.csv
    #[arg(long)]
    policy_dir: Option<PathBuf>,
}

/// One output row per applicant
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssessmentRow {
    applicant_id: String,
    overall_status: &'static str,
    max_eligible_amount: u64,
    requested_amount: f64,
    approval_odds: u32,
    dti: f64,
    erf: f64,
    csm: f64,
    interest_rate: f64,
    #[serde(rename = "estimatedEMI")]
    estimated_emi: f64,
    credit_rejected: bool,
    recommendations: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading applicants from {}...", cli.input.display());

    let applicants = load_applicants(&cli.input)
        .with_context(|| format!("loading applicants from {}", cli.input.display()))?;
    println!("Loaded {} applicants in {:?}", applicants.len(), start.elapsed());

    let policy = match &cli.policy_dir {
        Some(dir) => UnderwritingPolicy::from_csv_path(dir)?,
        None => UnderwritingPolicy::standard(),
    };
    let engine = EligibilityEngine::new(policy);

    println!("Running assessments...");
    let run_start = Instant::now();

    // Assess in parallel; the engine is read-only
    let rows: Vec<AssessmentRow> = applicants
        .par_iter()
        .map(|applicant| {
            let report = engine.assess_record(&applicant.record);
            AssessmentRow {
                applicant_id: applicant.applicant_id.clone(),
                overall_status: report.overall_status.as_str(),
                max_eligible_amount: report.max_eligible_amount,
                requested_amount: report.requested_amount,
                approval_odds: report.approval_odds,
                dti: report.dti,
                erf: report.financials.erf,
                csm: report.financials.csm,
                interest_rate: report.financials.interest_rate,
                estimated_emi: report.financials.estimated_emi,
                credit_rejected: report.credit_rejected,
                recommendations: report.recommendations.len(),
            }
        })
        .collect();

    println!("Assessments complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), cli.output.display());
    println!("Output written to {}", cli.output.display());

    let count = |status: OverallStatus| {
        rows.iter()
            .filter(|row| row.overall_status == status.as_str())
            .count()
    };
    let total_eligible: u64 = rows.iter().map(|row| row.max_eligible_amount).sum();

    println!("\nBatch Summary:");
    println!("  Approved: {}", count(OverallStatus::Approved));
    println!("  Review:   {}", count(OverallStatus::Review));
    println!("  Rejected: {}", count(OverallStatus::Rejected));
    println!(
        "  Total eligible amount: {}",
        loan_eligibility::format::format_inr(total_eligible as f64)
    );

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
