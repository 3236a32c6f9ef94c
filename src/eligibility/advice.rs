//! Scoring rules for the detailed report: status, odds, factors, recommendations

use super::capacity::CapacityBreakdown;
use super::report::{
    EligibilityFactor, FactorStatus, OverallStatus, Recommendation, RecommendationImpact,
};
use crate::format::format_inr;
use crate::profile::{ApplicantProfile, EmploymentType};

/// Income below this is rejected outright
const MIN_INCOME: f64 = 15_000.0;
/// Income at or above this passes the income check
const TARGET_INCOME: f64 = 25_000.0;
/// Applicants below this income are nudged towards a co-applicant
const COAPPLICANT_INCOME: f64 = 50_000.0;

const DTI_REJECT: f64 = 60.0;
const DTI_REVIEW: f64 = 45.0;
const DTI_HEALTHY: f64 = 35.0;

const PRIME_SCORE: u32 = 720;
const STRONG_SCORE: u32 = 750;
const EXCELLENT_SCORE: u32 = 780;

const ERF_STABLE: f64 = 0.85;
const ERF_REVIEW: f64 = 0.75;
const ERF_WEAK: f64 = 0.60;

const ODDS_BASE: i32 = 50;
const ODDS_CREDIT_REJECTED: i32 = 5;
const ODDS_MIN: i32 = 5;
const ODDS_MAX: i32 = 95;

/// Longest loan term suggested by the tenure recommendation
const MAX_SUGGESTED_TENURE: u32 = 7;

pub(crate) fn overall_status(
    profile: &ApplicantProfile,
    capacity: &CapacityBreakdown,
    dti: f64,
) -> OverallStatus {
    if capacity.credit_rejected || profile.monthly_income < MIN_INCOME || dti > DTI_REJECT {
        OverallStatus::Rejected
    } else if dti > DTI_REVIEW
        || !profile.has_credit_history
        || profile.credit_score < PRIME_SCORE
        || capacity.erf < ERF_REVIEW
    {
        OverallStatus::Review
    } else {
        OverallStatus::Approved
    }
}

/// Heuristic approval odds in [5, 95]
pub(crate) fn approval_odds(
    profile: &ApplicantProfile,
    capacity: &CapacityBreakdown,
    dti: f64,
    rejection_threshold: u32,
    seasoning_months: u32,
) -> u32 {
    let score = profile.credit_score;
    let mut odds = if capacity.credit_rejected {
        ODDS_CREDIT_REJECTED
    } else if score >= EXCELLENT_SCORE {
        ODDS_BASE + 30
    } else if score >= PRIME_SCORE {
        ODDS_BASE + 20
    } else if score >= rejection_threshold {
        ODDS_BASE + 10
    } else {
        ODDS_BASE - 20
    };

    let seasoned = profile.tenure_months() >= seasoning_months;
    odds += match profile.employment_type {
        EmploymentType::Salaried if seasoned => 15,
        EmploymentType::Salaried => 5,
        EmploymentType::Freelancer if !seasoned => -15,
        EmploymentType::Student => -25,
        _ => 0,
    };

    if dti > 50.0 {
        odds -= 20;
    } else if dti > 40.0 {
        odds -= 10;
    } else if dti <= 30.0 {
        odds += 10;
    }

    if profile.is_joint_application {
        odds += 15;
    }

    odds.clamp(ODDS_MIN, ODDS_MAX) as u32
}

fn factor(name: &str, score: f64, status: FactorStatus, description: String) -> EligibilityFactor {
    EligibilityFactor {
        name: name.to_string(),
        score: score.round().clamp(0.0, 100.0) as u32,
        status,
        description,
    }
}

/// The four fixed checks, in display order
pub(crate) fn eligibility_factors(
    profile: &ApplicantProfile,
    capacity: &CapacityBreakdown,
    dti: f64,
    rejection_threshold: u32,
) -> Vec<EligibilityFactor> {
    let income = profile.monthly_income;
    let income_factor = factor(
        "Income Level",
        (income / 100_000.0 * 100.0).min(100.0),
        if income >= TARGET_INCOME {
            FactorStatus::Pass
        } else if income >= MIN_INCOME {
            FactorStatus::Warning
        } else {
            FactorStatus::Fail
        },
        if income >= TARGET_INCOME {
            format!("{}/month - Meets requirements", format_inr(income))
        } else {
            format!(
                "{}/month - Below {} threshold",
                format_inr(income),
                format_inr(TARGET_INCOME)
            )
        },
    );

    let (dti_status, dti_note) = if dti <= DTI_HEALTHY {
        (FactorStatus::Pass, "Healthy ratio")
    } else if dti <= DTI_REVIEW {
        (FactorStatus::Warning, "Moderate - banks prefer <35%")
    } else {
        (FactorStatus::Fail, "High - consider reducing debt")
    };
    let dti_factor = factor(
        "Debt-to-Income Ratio",
        (100.0 - dti * 2.0).max(0.0),
        dti_status,
        format!("{:.1}% of income goes to obligations. {}", dti, dti_note),
    );

    let score = profile.credit_score;
    let credit_status = if capacity.credit_rejected {
        FactorStatus::Fail
    } else if !profile.has_credit_history {
        FactorStatus::Warning
    } else if score >= STRONG_SCORE {
        FactorStatus::Pass
    } else if score >= rejection_threshold {
        FactorStatus::Warning
    } else {
        FactorStatus::Fail
    };
    let credit_description = if capacity.credit_rejected {
        format!(
            "CIBIL Score: {} - Below {} minimum. Banks will reject.",
            score, rejection_threshold
        )
    } else if profile.has_credit_history {
        let band = if score >= EXCELLENT_SCORE {
            "Excellent"
        } else if score >= PRIME_SCORE {
            "Good"
        } else {
            "Fair"
        };
        format!(
            "CIBIL Score: {} - {} ({:.0}% multiplier)",
            score,
            band,
            capacity.csm * 100.0
        )
    } else {
        format!(
            "No credit history found - {:.0}% reduction applied",
            (1.0 - capacity.csm) * 100.0
        )
    };
    let credit_factor = factor(
        "Credit Score",
        if profile.has_credit_history {
            (score.saturating_sub(300)) as f64 / 6.0
        } else {
            40.0
        },
        credit_status,
        credit_description,
    );

    let erf = capacity.erf;
    let employment_factor = factor(
        "Employment Stability",
        erf * 100.0,
        if erf >= ERF_STABLE {
            FactorStatus::Pass
        } else if erf >= ERF_WEAK {
            FactorStatus::Warning
        } else {
            FactorStatus::Fail
        },
        format!(
            "{} ({}) - ERF: {:.0}%",
            profile.employment_type.label(),
            profile.employment_tenure.as_str(),
            erf * 100.0
        ),
    );

    vec![income_factor, dti_factor, credit_factor, employment_factor]
}

fn recommendation(
    title: &str,
    description: String,
    impact: RecommendationImpact,
) -> Recommendation {
    Recommendation {
        title: title.to_string(),
        description,
        impact,
    }
}

/// Independent checks; each true condition adds one entry, in check order
pub(crate) fn recommendations(
    profile: &ApplicantProfile,
    capacity: &CapacityBreakdown,
    dti: f64,
    rejection_threshold: u32,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let employment = profile.employment_type;
    let erf = capacity.erf;

    if erf < ERF_STABLE && employment != EmploymentType::Student {
        out.push(recommendation(
            "Increase Employment Tenure",
            format!(
                "Your ERF is {:.0}%. Completing 2+ years (24 months) in current role can increase eligibility by {:.0}%.",
                erf * 100.0,
                ((ERF_STABLE / erf - 1.0) * 100.0).round()
            ),
            RecommendationImpact::High,
        ));
    }

    if matches!(employment, EmploymentType::Freelancer | EmploymentType::Student) {
        out.push(recommendation(
            "Register as Business Entity",
            "Registering as Sole Proprietor or OPC and routing income through a current account can improve ERF from 60% to 75% over 6 months."
                .to_string(),
            RecommendationImpact::High,
        ));
    }

    if dti > DTI_HEALTHY {
        out.push(recommendation(
            "Reduce Existing Debt",
            format!(
                "Your DTI is {:.1}%. Paying off {} in existing loans can move DTI below 35% threshold.",
                dti,
                format_inr(profile.existing_emi * 0.3)
            ),
            RecommendationImpact::High,
        ));
    }

    if !profile.has_credit_history || profile.credit_score < PRIME_SCORE {
        let description = if capacity.credit_rejected {
            format!(
                "Score below {} means automatic rejection. Use secured credit card for 6 months to build score to 700+.",
                rejection_threshold
            )
        } else if profile.credit_score < PRIME_SCORE {
            "A score above 720 can reduce your interest rate by 1-2% and increase loan eligibility by 20%."
                .to_string()
        } else {
            "Maintain your score above 720 for best rates.".to_string()
        };
        out.push(recommendation(
            "Improve Credit Score",
            description,
            RecommendationImpact::High,
        ));
    }

    if !profile.is_joint_application && profile.monthly_income < COAPPLICANT_INCOME {
        out.push(recommendation(
            "Add Co-Applicant (Parent/Spouse)",
            "Adding an earning co-applicant can increase ERF to 85% and boost combined income for higher eligibility."
                .to_string(),
            RecommendationImpact::High,
        ));
    }

    if profile.tenure_years < 5 {
        out.push(recommendation(
            "Extend Loan Tenure",
            format!(
                "Increasing tenure from {} to {} years reduces EMI burden, allowing higher loan amount within your EMI capacity.",
                profile.tenure_years,
                (profile.tenure_years + 2).min(MAX_SUGGESTED_TENURE)
            ),
            RecommendationImpact::Medium,
        ));
    }

    out
}
