//! Fixed lender offers priced off the underwriting rate table
//!
//! Not part of the eligibility calculation itself: each offer is a plain EMI
//! on the requested amount at the applicant's rate plus a lender spread.

use crate::eligibility::amortization;
use crate::profile::ApplicantProfile;
use crate::underwriting::{SurchargeSchedule, UnderwritingPolicy};
use serde::{Deserialize, Serialize};

/// A lender product with its spread over the applicant's rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lender {
    pub bank_name: &'static str,
    pub product_name: &'static str,
    /// Percentage points added to the applicant's annual rate
    pub rate_offset: f64,
    /// Points subtracted from the base approval odds
    pub odds_penalty: u32,
}

pub const LENDERS: [Lender; 3] = [
    Lender {
        bank_name: "HDFC Bank",
        product_name: "Personal Loan",
        rate_offset: 0.0,
        odds_penalty: 0,
    },
    Lender {
        bank_name: "ICICI Bank",
        product_name: "Express Loan",
        rate_offset: 0.5,
        odds_penalty: 5,
    },
    Lender {
        bank_name: "Axis Bank",
        product_name: "Quick Loan",
        rate_offset: 0.3,
        odds_penalty: 3,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderOffer {
    pub bank_name: String,
    pub product_name: String,
    /// Annual rate in percent
    pub rate: f64,
    /// Rounded EMI on the requested amount
    pub emi: f64,
    pub approval_odds: u32,
}

/// Approval odds before any lender penalty
pub fn base_offer_odds(policy: &UnderwritingPolicy, profile: &ApplicantProfile) -> u32 {
    let credit = policy
        .credit
        .multiplier(profile.credit_score, profile.has_credit_history);
    match profile.credit_score {
        _ if credit.rejected => 5,
        s if s >= 750 => 90,
        s if s >= 700 => 75,
        s if s >= 650 => 50,
        _ => 30,
    }
}

/// Price the requested loan with every lender in [`LENDERS`]
pub fn compare_lenders(
    policy: &UnderwritingPolicy,
    profile: &ApplicantProfile,
) -> Vec<LenderOffer> {
    let rate = policy.rates.annual_rate(
        profile.credit_score,
        profile.employment_type,
        SurchargeSchedule::Full,
    );
    let base_odds = base_offer_odds(policy, profile);

    LENDERS
        .iter()
        .map(|lender| {
            let lender_rate = rate + lender.rate_offset;
            LenderOffer {
                bank_name: lender.bank_name.to_string(),
                product_name: lender.product_name.to_string(),
                rate: lender_rate,
                emi: amortization::emi(profile.loan_amount, lender_rate, profile.term_months())
                    .round(),
                approval_odds: base_odds.saturating_sub(lender.odds_penalty),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileRecord;
    use approx::assert_relative_eq;

    fn profile(score: u32) -> ApplicantProfile {
        UnderwritingPolicy::standard().resolve(&ProfileRecord {
            monthly_income: Some(60_000.0),
            credit_score: Some(score),
            loan_amount: Some(300_000.0),
            tenure: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn test_three_lenders_in_fixed_order() {
        let policy = UnderwritingPolicy::standard();
        let offers = compare_lenders(&policy, &profile(760));
        let names: Vec<_> = offers.iter().map(|o| o.bank_name.as_str()).collect();
        assert_eq!(names, ["HDFC Bank", "ICICI Bank", "Axis Bank"]);

        assert_relative_eq!(offers[0].rate, 10.5, epsilon = 1e-9);
        assert_relative_eq!(offers[1].rate, 11.0, epsilon = 1e-9);
        assert_relative_eq!(offers[2].rate, 10.8, epsilon = 1e-9);
        assert_eq!(offers[0].approval_odds, 90);
        assert_eq!(offers[1].approval_odds, 85);
        assert_eq!(offers[2].approval_odds, 87);

        let expected = amortization::emi(300_000.0, 10.5, 36).round();
        assert_eq!(offers[0].emi, expected);
        // Higher spread, higher EMI
        assert!(offers[1].emi > offers[0].emi);
    }

    #[test]
    fn test_odds_by_score_band() {
        let policy = UnderwritingPolicy::standard();
        assert_eq!(base_offer_odds(&policy, &profile(720)), 75);
        assert_eq!(base_offer_odds(&policy, &profile(600)), 5);

        let no_history = ApplicantProfile {
            has_credit_history: false,
            credit_score: 640,
            ..profile(640)
        };
        assert_eq!(base_offer_odds(&policy, &no_history), 30);
        let no_history = ApplicantProfile {
            credit_score: 660,
            ..no_history
        };
        assert_eq!(base_offer_odds(&policy, &no_history), 50);
    }

    #[test]
    fn test_odds_never_negative() {
        let policy = UnderwritingPolicy::standard();
        let offers = compare_lenders(&policy, &profile(500));
        assert_eq!(offers[0].approval_odds, 5);
        assert_eq!(offers[1].approval_odds, 0);
        assert_eq!(offers[2].approval_odds, 2);
    }
}
