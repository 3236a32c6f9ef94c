//! Detailed eligibility report structures

use serde::{Deserialize, Serialize};

/// Overall decision shown at the top of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Approved,
    Review,
    Rejected,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Approved => "approved",
            OverallStatus::Review => "review",
            OverallStatus::Rejected => "rejected",
        }
    }

    /// Headline message for the status
    ///
    /// `rejection_threshold` is the lowest score the credit table accepts.
    pub fn message(&self, credit_rejected: bool, rejection_threshold: u32) -> String {
        match self {
            OverallStatus::Approved => {
                "You meet eligibility criteria. Final amount subject to bank verification."
                    .to_string()
            }
            OverallStatus::Review => {
                "Your application needs additional review. Consider the recommendations below."
                    .to_string()
            }
            OverallStatus::Rejected if credit_rejected => format!(
                "Credit score below {} - banks will not approve. Build credit first.",
                rejection_threshold
            ),
            OverallStatus::Rejected => {
                "Current profile doesn't meet minimum requirements. Follow recommendations to improve."
                    .to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Pass,
    Warning,
    Fail,
}

/// One named check in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityFactor {
    pub name: String,
    /// 0-100
    pub score: u32,
    pub status: FactorStatus,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationImpact {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub impact: RecommendationImpact,
}

/// Financial breakdown behind the headline amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub monthly_income: f64,

    #[serde(rename = "existingEMI")]
    pub existing_emi: f64,

    pub monthly_expenses: f64,

    /// Net EMI capacity after the expense gate, rounded
    #[serde(rename = "availableForEMI")]
    pub available_for_emi: f64,

    /// Existing obligations as a percentage of income
    pub dti: f64,

    /// EMI on the eligible amount, rounded
    #[serde(rename = "estimatedEMI")]
    pub estimated_emi: f64,

    /// Annual rate (percent) including any employment surcharge
    pub interest_rate: f64,

    /// Repayment term in years
    pub tenure: u32,

    /// Debt-service ceiling as a percentage of income
    #[serde(rename = "maxEMIRatio")]
    pub max_emi_ratio: f64,

    pub erf: f64,

    pub csm: f64,

    pub raw_loan_before_multipliers: f64,

    pub coborrower_boost: u64,
}

/// Full output of the detailed eligibility mode
///
/// Built fresh for every assessment and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityReport {
    pub overall_status: OverallStatus,
    pub status_message: String,
    pub max_eligible_amount: u64,
    pub requested_amount: f64,
    /// Always within [5, 95]
    pub approval_odds: u32,
    pub dti: f64,
    pub credit_rejected: bool,
    pub factors: Vec<EligibilityFactor>,
    pub recommendations: Vec<Recommendation>,
    pub financials: Financials,
}
