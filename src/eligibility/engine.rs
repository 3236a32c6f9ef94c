//! Eligibility engine: detailed and summary modes over one capacity core

use super::advice;
use super::amortization;
use super::capacity::{self, CapacityBreakdown, CapacityInputs, CapacityVariant};
use super::dashboard::{self, DashboardSummary};
use super::report::{EligibilityReport, Financials};
use crate::offers;
use crate::profile::{ApplicantProfile, ProfileRecord};
use crate::underwriting::UnderwritingPolicy;
use log::debug;

/// Stateless engine holding the underwriting policy
///
/// Every method is pure; the engine can be shared across threads and
/// called concurrently.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    policy: UnderwritingPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: UnderwritingPolicy) -> Self {
        Self { policy }
    }

    pub fn standard() -> Self {
        Self::new(UnderwritingPolicy::standard())
    }

    pub fn policy(&self) -> &UnderwritingPolicy {
        &self.policy
    }

    /// Stages 1-7 under the given variant
    pub fn capacity(&self, inputs: &CapacityInputs, variant: CapacityVariant) -> CapacityBreakdown {
        capacity::compute(&self.policy, inputs, variant)
    }

    /// Detailed mode: full report with factors and recommendations
    pub fn assess(&self, profile: &ApplicantProfile) -> EligibilityReport {
        let breakdown =
            self.capacity(&CapacityInputs::from(profile), CapacityVariant::UNDERWRITING);
        let dti = profile.dti();
        let rejection_threshold = self.policy.credit.rejection_threshold();

        let overall_status = advice::overall_status(profile, &breakdown, dti);
        let approval_odds = advice::approval_odds(
            profile,
            &breakdown,
            dti,
            rejection_threshold,
            self.policy.employment_risk.seasoning_months,
        );
        let factors = advice::eligibility_factors(profile, &breakdown, dti, rejection_threshold);
        let recommendations =
            advice::recommendations(profile, &breakdown, dti, rejection_threshold);

        let estimated_emi = amortization::emi(
            breakdown.max_eligible_amount as f64,
            breakdown.annual_rate,
            breakdown.term_months,
        );

        debug!(
            "Assessed profile: status={} amount={} odds={} dti={:.1}",
            overall_status.as_str(),
            breakdown.max_eligible_amount,
            approval_odds,
            dti
        );

        EligibilityReport {
            overall_status,
            status_message: overall_status.message(breakdown.credit_rejected, rejection_threshold),
            max_eligible_amount: breakdown.max_eligible_amount,
            requested_amount: profile.loan_amount,
            approval_odds,
            dti,
            credit_rejected: breakdown.credit_rejected,
            factors,
            recommendations,
            financials: Financials {
                monthly_income: profile.monthly_income,
                existing_emi: profile.existing_emi,
                monthly_expenses: profile.monthly_expenses,
                available_for_emi: breakdown.net_emi_capacity.round(),
                dti,
                estimated_emi: estimated_emi.round(),
                interest_rate: breakdown.annual_rate,
                tenure: profile.tenure_years,
                max_emi_ratio: breakdown.max_emi_ratio * 100.0,
                erf: breakdown.erf,
                csm: breakdown.csm,
                raw_loan_before_multipliers: breakdown.raw_loan.round(),
                coborrower_boost: breakdown.coborrower_boost,
            },
        }
    }

    /// Resolve a raw record with the policy defaults, then assess it
    pub fn assess_record(&self, record: &ProfileRecord) -> EligibilityReport {
        self.assess(&self.policy.resolve(record))
    }

    /// Summary mode for the dashboard
    pub fn summarize(
        &self,
        profile: &ApplicantProfile,
        uploaded_documents: u32,
    ) -> DashboardSummary {
        let breakdown =
            self.capacity(&CapacityInputs::from(profile), CapacityVariant::UNDERWRITING);
        let dti = profile.dti();

        let is_eligible = dashboard::is_eligible(profile, &breakdown, dti);
        let document_readiness = dashboard::document_readiness(uploaded_documents);
        let credit_readiness_score =
            dashboard::credit_readiness_score(profile, dti, document_readiness);

        DashboardSummary {
            is_eligible,
            max_eligible_amount: breakdown.max_eligible_amount,
            credit_rejected: breakdown.credit_rejected,
            document_readiness,
            credit_readiness_score,
            readiness_label: dashboard::readiness_label(credit_readiness_score).to_string(),
            next_action: dashboard::next_action(is_eligible, breakdown.credit_rejected).to_string(),
            dti,
            erf: breakdown.erf,
            csm: breakdown.csm,
            offers: offers::compare_lenders(&self.policy, profile),
        }
    }
}
