//! Summary mode: the compact view shown on the applicant dashboard

use super::capacity::CapacityBreakdown;
use crate::offers::LenderOffer;
use crate::profile::{ApplicantProfile, EmploymentTenure, EmploymentType};
use serde::{Deserialize, Serialize};

/// Documents expected before an application is considered complete
pub const REQUIRED_DOCUMENTS: u32 = 5;

const ELIGIBLE_MAX_DTI: f64 = 45.0;
const ELIGIBLE_MIN_INCOME: f64 = 25_000.0;
const ELIGIBLE_MIN_ERF: f64 = 0.60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub is_eligible: bool,
    pub max_eligible_amount: u64,
    pub credit_rejected: bool,
    /// Share of required documents uploaded, 0-100
    pub document_readiness: u32,
    /// Composite readiness score, 0-100
    pub credit_readiness_score: u32,
    pub readiness_label: String,
    pub next_action: String,
    pub dti: f64,
    pub erf: f64,
    pub csm: f64,
    pub offers: Vec<LenderOffer>,
}

pub(crate) fn is_eligible(
    profile: &ApplicantProfile,
    capacity: &CapacityBreakdown,
    dti: f64,
) -> bool {
    !capacity.credit_rejected
        && dti <= ELIGIBLE_MAX_DTI
        && profile.monthly_income >= ELIGIBLE_MIN_INCOME
        && capacity.erf >= ELIGIBLE_MIN_ERF
}

pub fn document_readiness(uploaded_documents: u32) -> u32 {
    let pct = (uploaded_documents as f64 / REQUIRED_DOCUMENTS as f64 * 100.0).round();
    pct.min(100.0) as u32
}

fn income_stability(profile: &ApplicantProfile) -> f64 {
    use EmploymentTenure::*;
    match (profile.employment_type, profile.employment_tenure) {
        (EmploymentType::Salaried, OverFiveYears) => 25.0,
        (EmploymentType::Salaried, TwoToFiveYears) => 23.0,
        (EmploymentType::Salaried, OneToTwoYears) => 20.0,
        (EmploymentType::Salaried, _) => 18.0,
        (EmploymentType::SelfEmployed, OverFiveYears) => 22.0,
        (EmploymentType::SelfEmployed, TwoToFiveYears) => 18.0,
        (EmploymentType::SelfEmployed, _) => 15.0,
        _ => 10.0,
    }
}

fn credit_behavior(profile: &ApplicantProfile) -> f64 {
    match (profile.has_credit_history, profile.credit_score) {
        (true, score) if score >= 750 => 20.0,
        (true, _) => 15.0,
        (false, _) => 5.0,
    }
}

/// Composite score from DTI, income stability, credit behaviour and documents
pub fn credit_readiness_score(
    profile: &ApplicantProfile,
    dti: f64,
    document_readiness: u32,
) -> u32 {
    let dti_points = (30.0 - dti * 0.6).max(0.0);
    let document_points = (document_readiness as f64 / 100.0 * 15.0).round();
    let total =
        dti_points + income_stability(profile) + credit_behavior(profile) + document_points + 5.0;
    total.round().clamp(0.0, 100.0) as u32
}

pub fn readiness_label(score: u32) -> &'static str {
    match score {
        80.. => "Excellent - Ready to apply!",
        60..=79 => "Good - Few improvements needed",
        40..=59 => "Fair - Work on key areas",
        _ => "Needs improvement",
    }
}

pub(crate) fn next_action(is_eligible: bool, credit_rejected: bool) -> &'static str {
    if is_eligible {
        "Compare Loans"
    } else if credit_rejected {
        "Build Credit First"
    } else {
        "Improve Profile"
    }
}
