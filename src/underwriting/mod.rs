//! Underwriting policy: every constant the eligibility model depends on
//!
//! One explicit configuration structure replaces the defaults and thresholds
//! that would otherwise be scattered across call sites.

mod defaults;
mod rates;
mod risk;
pub mod loader;

pub use defaults::{ProfileDefaults, MAX_CREDIT_SCORE, MAX_TENURE_YEARS, MIN_CREDIT_SCORE};
pub use rates::{EmploymentSurcharges, RateTable, ScoreBand, SurchargeSchedule};
pub use risk::{CreditMultiplier, CreditMultipliers, EmploymentRisk, JointFloorRule};

use crate::error::Result;
use crate::profile::{ApplicantProfile, EmploymentType, ProfileRecord};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Debt-service limits (stages 2-4 and the final cap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtServicePolicy {
    /// Max total EMI as a share of income for salaried applicants
    pub salaried_emi_ratio: f64,
    /// Max total EMI share for everyone else
    pub other_emi_ratio: f64,
    /// Share of income that must stay free after EMIs and expenses
    pub survival_buffer: f64,
    /// Eligible amount never exceeds this many months of income
    pub income_multiple_cap: f64,
}

impl Default for DebtServicePolicy {
    fn default() -> Self {
        Self {
            salaried_emi_ratio: 0.45,
            other_emi_ratio: 0.35,
            survival_buffer: 0.20,
            income_multiple_cap: 36.0,
        }
    }
}

impl DebtServicePolicy {
    pub fn max_emi_ratio(&self, employment: EmploymentType) -> f64 {
        match employment {
            EmploymentType::Salaried => self.salaried_emi_ratio,
            _ => self.other_emi_ratio,
        }
    }
}

/// How a co-borrower's income adds to a joint application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoBorrowerTerms {
    /// Share of the co-borrower's EMI headroom counted towards the loan
    pub emi_share: f64,
    /// Risk factor applied to the co-borrower's portion
    pub risk_factor: f64,
}

impl Default for CoBorrowerTerms {
    fn default() -> Self {
        Self {
            emi_share: 0.5,
            risk_factor: 0.85,
        }
    }
}

/// Container for all underwriting assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingPolicy {
    pub defaults: ProfileDefaults,
    pub employment_risk: EmploymentRisk,
    pub debt_service: DebtServicePolicy,
    pub rates: RateTable,
    pub credit: CreditMultipliers,
    pub coborrower: CoBorrowerTerms,
}

impl UnderwritingPolicy {
    /// Bank-grade retail policy used by the dashboard, report and optimizer
    pub fn standard() -> Self {
        Self::default()
    }

    /// Load the score tables from CSV files in the default location (data/underwriting/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_UNDERWRITING_PATH))
    }

    /// Load the score tables from CSV files in a specific directory
    ///
    /// Rate bands and credit multipliers come from the files; every other
    /// assumption keeps its standard value.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let standard = Self::standard();

        let rate_bands = loader::load_score_bands(path, loader::RATE_BANDS_FILE)?;
        let credit_bands = loader::load_score_bands(path, loader::CREDIT_MULTIPLIERS_FILE)?;
        info!(
            "Loaded {} rate bands and {} credit multiplier bands from {}",
            rate_bands.len(),
            credit_bands.len(),
            path.display()
        );

        Ok(Self {
            rates: RateTable::new(
                rate_bands,
                standard.rates.floor_rate(),
                standard.rates.surcharges.clone(),
            ),
            credit: CreditMultipliers::new(credit_bands, standard.credit.no_history),
            ..standard
        })
    }

    /// Resolve a raw onboarding record with this policy's defaults
    pub fn resolve(&self, record: &ProfileRecord) -> ApplicantProfile {
        self.defaults.resolve(record)
    }
}
