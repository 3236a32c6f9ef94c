//! Fallback values for every defaultable applicant field

use crate::profile::{ApplicantProfile, EmploymentTenure, EmploymentType, LoanType, ProfileRecord};
use log::warn;
use serde::{Deserialize, Serialize};

/// Score domain reported by Indian credit bureaus
pub const MIN_CREDIT_SCORE: u32 = 300;
pub const MAX_CREDIT_SCORE: u32 = 900;

/// Longest repayment term accepted from a record
pub const MAX_TENURE_YEARS: u32 = 30;

/// Defaults applied when resolving a [`ProfileRecord`] into an [`ApplicantProfile`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefaults {
    pub monthly_income: f64,
    /// Share of income assumed as living expenses when none are stated
    pub expense_ratio: f64,
    pub loan_amount: f64,
    pub tenure_years: u32,
    pub credit_score: u32,
    pub has_credit_history: bool,
    pub employment_type: EmploymentType,
    pub employment_tenure: EmploymentTenure,
    pub loan_type: LoanType,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            monthly_income: 30_000.0,
            expense_ratio: 0.30,
            loan_amount: 500_000.0,
            tenure_years: 3,
            credit_score: 650,
            has_credit_history: true,
            employment_type: EmploymentType::Salaried,
            employment_tenure: EmploymentTenure::OneToTwoYears,
            loan_type: LoanType::Personal,
        }
    }
}

impl ProfileDefaults {
    /// Resolve a raw record, replacing absent or unusable values
    ///
    /// Never fails: unrecognized enum strings fall back to the catch-all
    /// variant and numeric fields fall back to the configured defaults.
    pub fn resolve(&self, record: &ProfileRecord) -> ApplicantProfile {
        let monthly_income = positive(record.monthly_income).unwrap_or(self.monthly_income);
        let existing_emi = non_negative(record.existing_emi).unwrap_or(0.0);
        let monthly_expenses = positive(record.monthly_expenses)
            .unwrap_or_else(|| (monthly_income * self.expense_ratio).round());
        let loan_amount = positive(record.loan_amount).unwrap_or(self.loan_amount);
        let tenure_years = record
            .tenure
            .filter(|&t| t > 0)
            .map(|t| t.min(MAX_TENURE_YEARS))
            .unwrap_or(self.tenure_years);
        let credit_score = record
            .credit_score
            .filter(|&s| s > 0)
            .map(|s| s.clamp(MIN_CREDIT_SCORE, MAX_CREDIT_SCORE))
            .unwrap_or(self.credit_score);

        let employment_type = match record.employment_type.as_deref() {
            None | Some("") => self.employment_type,
            Some(raw) => EmploymentType::parse(raw).unwrap_or_else(|| {
                warn!("Unrecognized employment type {:?}, using default risk factor", raw);
                EmploymentType::Other
            }),
        };

        let employment_tenure = match record.employment_tenure.as_deref() {
            None | Some("") => self.employment_tenure,
            Some(raw) => EmploymentTenure::parse(raw).unwrap_or_else(|| {
                warn!("Unrecognized employment tenure {:?}, assuming 18 months", raw);
                EmploymentTenure::Unrecognized
            }),
        };

        let loan_type = match record.loan_type.as_deref() {
            None | Some("") => self.loan_type,
            Some(raw) => LoanType::parse(raw).unwrap_or(LoanType::Other),
        };

        let is_joint_application = record.is_joint_application.unwrap_or(false);
        let coborrower_income = if is_joint_application {
            non_negative(record.coborrower_income).unwrap_or(0.0)
        } else {
            0.0
        };

        ApplicantProfile {
            monthly_income,
            existing_emi,
            monthly_expenses,
            loan_amount,
            tenure_years,
            credit_score,
            has_credit_history: record.has_credit_history.unwrap_or(self.has_credit_history),
            employment_type,
            employment_tenure,
            is_joint_application,
            coborrower_income,
            loan_type,
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}
