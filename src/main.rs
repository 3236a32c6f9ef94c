//! Loan Eligibility CLI
//!
//! Assess a stored onboarding record, run what-if scenarios, or print the
//! dashboard summary.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use loan_eligibility::format::format_inr;
use loan_eligibility::profile::{load_record_json, JsonFileProfileStore};
use loan_eligibility::{
    EligibilityEngine, ProfileRecord, ProfileStore, ScenarioSimulator, SimulationDelta,
    UnderwritingPolicy,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loan-eligibility")]
#[command(about = "Bank-grade loan eligibility calculator", long_about = None)]
struct Cli {
    /// Directory holding rate_bands.csv and credit_multipliers.csv
    #[arg(long, global = true)]
    policy_dir: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the onboarding record comes from
#[derive(Args)]
struct ProfileSource {
    /// Onboarding record as a JSON file
    #[arg(short, long, conflicts_with_all = ["store", "user"])]
    profile: Option<PathBuf>,

    /// Profile store file
    #[arg(long, requires = "user")]
    store: Option<PathBuf>,

    /// Key of the record in the profile store
    #[arg(short, long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full eligibility report
    Assess {
        #[command(flatten)]
        source: ProfileSource,
    },

    /// Compare today's capacity with a projected profile
    Simulate {
        #[command(flatten)]
        source: ProfileSource,

        /// Lump sum paid towards existing loans
        #[arg(long, default_value_t = 0.0)]
        pay_off_debt: f64,

        /// Extra monthly income
        #[arg(long, default_value_t = 0.0)]
        increase_income: f64,

        /// Credit score points gained
        #[arg(long, default_value_t = 0)]
        improve_score: u32,

        /// Months to wait before applying
        #[arg(long, default_value_t = 0)]
        wait_months: u32,

        /// Apply with a joint applicant
        #[arg(long)]
        joint: bool,
    },

    /// Dashboard summary with lender offers
    Dashboard {
        #[command(flatten)]
        source: ProfileSource,

        /// Number of documents uploaded so far
        #[arg(long, default_value_t = 0)]
        documents: u32,
    },

    /// Save an onboarding record into a profile store
    SaveProfile {
        /// Onboarding record as a JSON file
        #[arg(short, long)]
        profile: PathBuf,

        /// Profile store file
        #[arg(long)]
        store: PathBuf,

        /// Key to store the record under
        #[arg(short, long)]
        user: String,
    },
}

impl ProfileSource {
    fn load(&self) -> Result<ProfileRecord> {
        if let Some(path) = &self.profile {
            return load_record_json(path)
                .with_context(|| format!("reading profile {}", path.display()));
        }
        match (&self.store, &self.user) {
            (Some(store), Some(user)) => JsonFileProfileStore::new(store)
                .get(user)?
                .with_context(|| format!("no profile stored for {:?}", user)),
            _ => bail!("pass --profile <file> or --store <file> --user <key>"),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let policy = match &cli.policy_dir {
        Some(dir) => UnderwritingPolicy::from_csv_path(dir)
            .with_context(|| format!("loading underwriting tables from {}", dir.display()))?,
        None => UnderwritingPolicy::standard(),
    };

    match &cli.command {
        Commands::Assess { source } => {
            let profile = policy.resolve(&source.load()?);
            let report = EligibilityEngine::new(policy).assess(&profile);
            if cli.json {
                return print_json(&report);
            }

            println!("Status: {} - {}", report.overall_status.as_str(), report.status_message);
            println!("  Max Eligible:  {}", format_inr(report.max_eligible_amount as f64));
            println!("  Requested:     {}", format_inr(report.requested_amount));
            println!("  Approval Odds: {}%", report.approval_odds);
            println!("  DTI:           {:.1}%", report.dti);
            println!(
                "  Est. EMI:      {} at {:.2}% over {} years",
                format_inr(report.financials.estimated_emi),
                report.financials.interest_rate,
                report.financials.tenure
            );
            println!("\nFactors:");
            for factor in &report.factors {
                println!(
                    "  {:<22} {:>3} {:<8} {}",
                    factor.name,
                    factor.score,
                    format!("{:?}", factor.status).to_lowercase(),
                    factor.description
                );
            }
            if !report.recommendations.is_empty() {
                println!("\nRecommendations:");
                for rec in &report.recommendations {
                    println!("  - {}: {}", rec.title, rec.description);
                }
            }
        }

        Commands::Simulate {
            source,
            pay_off_debt,
            increase_income,
            improve_score,
            wait_months,
            joint,
        } => {
            let profile = policy.resolve(&source.load()?);
            let delta = SimulationDelta {
                pay_off_debt: *pay_off_debt,
                increase_income: *increase_income,
                improve_score: *improve_score,
                wait_months: *wait_months,
                joint_application: *joint,
            };
            let report = ScenarioSimulator::new(policy).simulate(&profile, &delta);
            if cli.json {
                return print_json(&report);
            }

            println!(
                "Current:   {} ({}% odds)",
                format_inr(report.current.max_amount as f64),
                report.current.approval_odds
            );
            println!(
                "Projected: {} ({}% odds)",
                format_inr(report.projected.max_amount as f64),
                report.projected.approval_odds
            );
            println!(
                "Change:    {} ({:+.1}%)",
                format_inr(report.improvement.amount as f64),
                report.improvement.percentage
            );
            for impact in &report.impacts {
                println!(
                    "  {:<18} +{:<5.1} {}",
                    impact.factor.name(),
                    impact.change,
                    impact.description
                );
            }
            println!("\n{}", report.guidance);
            println!("Timeline: {}", report.timeline);
        }

        Commands::Dashboard { source, documents } => {
            let profile = policy.resolve(&source.load()?);
            let summary = EligibilityEngine::new(policy).summarize(&profile, *documents);
            if cli.json {
                return print_json(&summary);
            }

            println!(
                "Eligible: {}  Max: {}",
                if summary.is_eligible { "yes" } else { "no" },
                format_inr(summary.max_eligible_amount as f64)
            );
            println!(
                "Readiness: {}/100 ({})  Documents: {}%",
                summary.credit_readiness_score, summary.readiness_label, summary.document_readiness
            );
            println!("Next: {}", summary.next_action);
            for offer in &summary.offers {
                println!(
                    "  {:<11} {:<14} {:>5.2}%  EMI {:>10}  odds {}%",
                    offer.bank_name,
                    offer.product_name,
                    offer.rate,
                    format_inr(offer.emi),
                    offer.approval_odds
                );
            }
        }

        Commands::SaveProfile { profile, store, user } => {
            let record = load_record_json(profile)
                .with_context(|| format!("reading profile {}", profile.display()))?;
            let mut store = JsonFileProfileStore::new(store);
            store.set(user, record)?;
            println!("Saved profile {:?} to {}", user, store.path().display());
        }
    }

    Ok(())
}
