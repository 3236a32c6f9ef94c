//! Loan eligibility: capacity stages, detailed report and dashboard summary

mod advice;
pub mod amortization;
pub mod capacity;
pub mod dashboard;
pub mod engine;
pub mod report;

pub use capacity::{CapacityBreakdown, CapacityInputs, CapacityVariant};
pub use dashboard::DashboardSummary;
pub use engine::EligibilityEngine;
pub use report::{
    EligibilityFactor, EligibilityReport, FactorStatus, Financials, OverallStatus, Recommendation,
    RecommendationImpact,
};

use crate::profile::ApplicantProfile;

/// Detailed assessment under the standard policy
pub fn compute_eligibility(profile: &ApplicantProfile) -> EligibilityReport {
    EligibilityEngine::standard().assess(profile)
}
