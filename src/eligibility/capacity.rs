//! The seven-stage loan capacity calculation
//!
//! Every caller (detailed report, dashboard summary, scenario simulator)
//! goes through [`compute`]; the differences between them are expressed as a
//! [`CapacityVariant`] rather than separate copies of the formula.

use super::amortization::{annuity_factor, monthly_rate, principal_from_emi};
use crate::profile::{ApplicantProfile, EmploymentType, LoanType};
use crate::underwriting::{JointFloorRule, SurchargeSchedule, UnderwritingPolicy};
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameterizes the places where call sites of the capacity formula disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityVariant {
    pub surcharges: SurchargeSchedule,
    pub joint_floor: JointFloorRule,
    pub coborrower_boost: bool,
}

impl CapacityVariant {
    /// Detailed report and dashboard summary
    pub const UNDERWRITING: Self = Self {
        surcharges: SurchargeSchedule::Full,
        joint_floor: JointFloorRule::EducationLoansOnly,
        coborrower_boost: true,
    };

    /// Scenario simulator
    ///
    /// Prices students without the +2% surcharge. This differs from the
    /// underwriting report and is pending product sign-off.
    pub const SIMULATION: Self = Self {
        surcharges: SurchargeSchedule::ExcludingStudent,
        joint_floor: JointFloorRule::AnyLoan,
        coborrower_boost: false,
    };
}

/// Inputs to the capacity stages
///
/// Separate from [`ApplicantProfile`] because the simulator projects
/// tenure in months, which the questionnaire buckets cannot express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityInputs {
    pub monthly_income: f64,
    pub existing_emi: f64,
    pub monthly_expenses: f64,
    pub tenure_years: u32,
    pub credit_score: u32,
    pub has_credit_history: bool,
    pub employment_type: EmploymentType,
    /// Months in the current role
    pub tenure_months: u32,
    pub loan_type: LoanType,
    pub is_joint: bool,
    pub coborrower_income: f64,
}

impl From<&ApplicantProfile> for CapacityInputs {
    fn from(profile: &ApplicantProfile) -> Self {
        Self {
            monthly_income: profile.monthly_income,
            existing_emi: profile.existing_emi,
            monthly_expenses: profile.monthly_expenses,
            tenure_years: profile.tenure_years,
            credit_score: profile.credit_score,
            has_credit_history: profile.has_credit_history,
            employment_type: profile.employment_type,
            tenure_months: profile.tenure_months(),
            loan_type: profile.loan_type,
            is_joint: profile.is_joint_application,
            coborrower_income: profile.coborrower_income,
        }
    }
}

/// Intermediate values of every stage, plus the final amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityBreakdown {
    /// Stage 1
    pub erf: f64,
    /// Stage 2
    pub max_emi_ratio: f64,
    pub max_total_emi: f64,
    /// Stages 3-4
    pub net_emi_capacity: f64,
    pub expense_gate_applied: bool,
    /// Stage 5
    pub annual_rate: f64,
    pub monthly_rate: f64,
    pub term_months: u32,
    pub annuity_factor: f64,
    pub raw_loan: f64,
    /// Stage 6
    pub csm: f64,
    pub credit_rejected: bool,
    /// Stage 7 before any co-borrower contribution
    pub primary_amount: u64,
    pub coborrower_boost: u64,
    pub max_eligible_amount: u64,
}

/// Floor a currency amount into a non-negative whole number
fn whole_amount(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Run stages 1-7 for one applicant
pub fn compute(
    policy: &UnderwritingPolicy,
    inputs: &CapacityInputs,
    variant: CapacityVariant,
) -> CapacityBreakdown {
    let income = inputs.monthly_income;

    // Stage 1: employment risk
    let erf = policy.employment_risk.factor(
        inputs.employment_type,
        inputs.tenure_months,
        inputs.loan_type,
        inputs.is_joint,
        variant.joint_floor,
    );

    // Stage 2: debt-service ceiling
    let max_emi_ratio = policy.debt_service.max_emi_ratio(inputs.employment_type);
    let max_total_emi = income * max_emi_ratio;

    // Stage 3: headroom after existing obligations
    let mut net_emi_capacity = (max_total_emi - inputs.existing_emi).max(0.0);

    // Stage 4: expense safety gate, can only shrink capacity
    let required_remaining = inputs.monthly_expenses + income * policy.debt_service.survival_buffer;
    let remaining_after_emi = income - inputs.existing_emi - net_emi_capacity;
    let expense_gate_applied = remaining_after_emi < required_remaining;
    if expense_gate_applied {
        net_emi_capacity = (income - inputs.existing_emi - required_remaining).max(0.0);
    }

    // Stage 5: EMI -> principal
    if inputs.employment_type == EmploymentType::Student
        && variant.surcharges == SurchargeSchedule::ExcludingStudent
    {
        debug!("Student priced without the employment surcharge");
    }
    let annual_rate = policy.rates.annual_rate(
        inputs.credit_score,
        inputs.employment_type,
        variant.surcharges,
    );
    let i = monthly_rate(annual_rate);
    let term_months = inputs.tenure_years.saturating_mul(12);
    let annuity = annuity_factor(i, term_months);
    let raw_loan = principal_from_emi(net_emi_capacity, i, term_months);

    // Stage 6: credit quality
    let credit = policy
        .credit
        .multiplier(inputs.credit_score, inputs.has_credit_history);

    // Stage 7: final amount
    let cap = whole_amount(income * policy.debt_service.income_multiple_cap);
    let primary_amount = if credit.rejected {
        0
    } else {
        whole_amount(raw_loan * erf * credit.csm).min(cap)
    };

    let coborrower_boost = if variant.coborrower_boost
        && inputs.is_joint
        && inputs.coborrower_income > 0.0
        && !credit.rejected
    {
        let terms = &policy.coborrower;
        whole_amount(
            inputs.coborrower_income
                * max_emi_ratio
                * terms.emi_share
                * annuity
                * terms.risk_factor,
        )
    } else {
        0
    };

    let max_eligible_amount = if credit.rejected {
        0
    } else {
        primary_amount.saturating_add(coborrower_boost).min(cap)
    };

    let breakdown = CapacityBreakdown {
        erf,
        max_emi_ratio,
        max_total_emi,
        net_emi_capacity,
        expense_gate_applied,
        annual_rate,
        monthly_rate: i,
        term_months,
        annuity_factor: annuity,
        raw_loan,
        csm: credit.csm,
        credit_rejected: credit.rejected,
        primary_amount,
        coborrower_boost,
        max_eligible_amount,
    };
    debug!(
        "Capacity: erf={:.2} net_emi={:.0} rate={:.2}% raw={:.0} csm={:.2} amount={}",
        breakdown.erf,
        breakdown.net_emi_capacity,
        breakdown.annual_rate,
        breakdown.raw_loan,
        breakdown.csm,
        breakdown.max_eligible_amount
    );
    breakdown
}
