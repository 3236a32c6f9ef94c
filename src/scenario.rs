//! What-if simulator for improving loan eligibility
//!
//! Compares today's capacity with the capacity after a set of applicant
//! actions (paying off debt, earning more, improving the score, waiting,
//! applying jointly), then picks a guidance template and a timeline.

use crate::eligibility::{CapacityInputs, CapacityVariant, EligibilityEngine};
use crate::format::format_inr;
use crate::profile::{debt_to_income, ApplicantProfile};
use crate::underwriting::UnderwritingPolicy;
use log::debug;
use serde::{Deserialize, Serialize};

/// Tunables of the projection that are not underwriting policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Household income assumed to be added by a joint applicant
    pub joint_income_uplift: f64,
    /// Highest credit score a projection can reach
    pub score_ceiling: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            joint_income_uplift: 40_000.0,
            score_ceiling: 850,
        }
    }
}

/// Actions the applicant is considering, relative to the stored profile
///
/// Negative amounts are treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationDelta {
    /// Lump sum used to pay down existing loans
    pub pay_off_debt: f64,
    /// Extra monthly income
    pub increase_income: f64,
    /// Credit score points gained
    #[serde(deserialize_with = "crate::profile::lenient_count")]
    pub improve_score: u32,
    /// Months to wait before applying
    #[serde(deserialize_with = "crate::profile::lenient_count")]
    pub wait_months: u32,
    pub joint_application: bool,
}

impl SimulationDelta {
    fn pay_off_debt(&self) -> f64 {
        non_negative(self.pay_off_debt)
    }

    fn increase_income(&self) -> f64 {
        non_negative(self.increase_income)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactFactor {
    #[serde(rename = "Debt Reduction")]
    DebtReduction,
    #[serde(rename = "Income Growth")]
    IncomeGrowth,
    #[serde(rename = "Credit Score")]
    CreditScore,
    #[serde(rename = "Joint Application")]
    JointApplication,
    #[serde(rename = "Employment Tenure")]
    EmploymentTenure,
}

impl ImpactFactor {
    pub fn name(&self) -> &'static str {
        match self {
            ImpactFactor::DebtReduction => "Debt Reduction",
            ImpactFactor::IncomeGrowth => "Income Growth",
            ImpactFactor::CreditScore => "Credit Score",
            ImpactFactor::JointApplication => "Joint Application",
            ImpactFactor::EmploymentTenure => "Employment Tenure",
        }
    }
}

/// Estimated effect of one action, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub factor: ImpactFactor,
    pub change: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySnapshot {
    pub max_amount: u64,
    pub approval_odds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    /// Projected minus current amount; negative if the projection is worse
    pub amount: i64,
    /// Relative change in percent, 0 when the current amount is 0
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub current: CapacitySnapshot,
    pub projected: CapacitySnapshot,
    pub improvement: Improvement,
    /// Only actions with a positive effect, in fixed order
    pub impacts: Vec<Impact>,
    /// Rule-based guidance text
    pub guidance: String,
    pub timeline: String,
}

pub const JOINT_GUIDANCE: &str =
    "Adding a joint applicant has the highest impact. Consider applying with a spouse or family member with stable income.";
pub const DEBT_GUIDANCE: &str =
    "Focus on paying off existing high-interest loans first. This will significantly improve your DTI ratio and eligibility.";
pub const INCOME_GUIDANCE: &str =
    "Negotiate a raise or consider additional income sources. Higher income directly increases your loan eligibility.";
pub const CREDIT_GUIDANCE: &str =
    "Work on building your credit score by paying bills on time and using credit responsibly for the next few months.";
pub const GENERAL_GUIDANCE: &str =
    "Consider a combination of strategies for maximum impact on your loan eligibility.";

const DEBT_IMPACT_CAP: f64 = 20.0;
const INCOME_IMPACT_CAP: f64 = 25.0;
const SCORE_IMPACT_CAP: f64 = 15.0;
const JOINT_IMPACT: f64 = 30.0;
const TENURE_IMPACT: f64 = 15.0;
/// Waiting at least this long counts towards seasoning
const MIN_USEFUL_WAIT_MONTHS: u32 = 6;

/// Choose the guidance text for a scenario
///
/// A joint application always wins; otherwise the largest positive impact
/// picks the template (first one on ties). Tenure-only or empty scenarios
/// get the general text.
pub fn select_guidance_template(delta: &SimulationDelta, impacts: &[Impact]) -> &'static str {
    if delta.joint_application {
        return JOINT_GUIDANCE;
    }
    let strongest = impacts
        .iter()
        .filter(|impact| impact.change > 0.0)
        .fold(None::<&Impact>, |best, impact| match best {
            Some(b) if b.change >= impact.change => Some(b),
            _ => Some(impact),
        });
    match strongest.map(|impact| impact.factor) {
        Some(ImpactFactor::DebtReduction) => DEBT_GUIDANCE,
        Some(ImpactFactor::IncomeGrowth) => INCOME_GUIDANCE,
        Some(ImpactFactor::CreditScore) => CREDIT_GUIDANCE,
        _ => GENERAL_GUIDANCE,
    }
}

/// Months until the projected profile is realistic
pub fn timeline_months(delta: &SimulationDelta) -> u32 {
    let mut months = delta.wait_months;
    if delta.improve_score > 0 {
        months = months.max(3);
    }
    if delta.pay_off_debt() > 50_000.0 {
        months = months.max(6);
    }
    if delta.joint_application {
        months = months.max(1);
    }
    months
}

pub fn timeline_label(months: u32) -> &'static str {
    match months {
        0 => "Immediate",
        1..=3 => "1-3 months",
        4..=6 => "3-6 months",
        _ => "6-12 months",
    }
}

/// Simplified odds shown next to the simulated amounts
fn snapshot_odds(score: u32, joint: bool, ceiling: u32) -> u32 {
    let score_points = match score {
        s if s >= 720 => 20,
        s if s >= 680 => 10,
        _ => 0,
    };
    let joint_points = if joint { 10 } else { 0 };
    (50 + score_points + joint_points).min(ceiling)
}

/// Pre-built simulator holding the underwriting policy
#[derive(Debug, Clone, Default)]
pub struct ScenarioSimulator {
    engine: EligibilityEngine,
    config: SimulationConfig,
}

impl ScenarioSimulator {
    pub fn new(policy: UnderwritingPolicy) -> Self {
        Self::with_config(policy, SimulationConfig::default())
    }

    pub fn with_config(policy: UnderwritingPolicy, config: SimulationConfig) -> Self {
        Self {
            engine: EligibilityEngine::new(policy),
            config,
        }
    }

    pub fn policy(&self) -> &UnderwritingPolicy {
        self.engine.policy()
    }

    /// Current vs projected capacity for one set of actions
    pub fn simulate(
        &self,
        profile: &ApplicantProfile,
        delta: &SimulationDelta,
    ) -> SimulationReport {
        let current_inputs = CapacityInputs {
            is_joint: false,
            coborrower_income: 0.0,
            ..CapacityInputs::from(profile)
        };
        let projected_inputs = self.project(&current_inputs, delta);

        let current = self
            .engine
            .capacity(&current_inputs, CapacityVariant::SIMULATION);
        let projected = self
            .engine
            .capacity(&projected_inputs, CapacityVariant::SIMULATION);

        let diff = projected.max_eligible_amount as i64 - current.max_eligible_amount as i64;
        let percentage = if current.max_eligible_amount > 0 {
            diff as f64 / current.max_eligible_amount as f64 * 100.0
        } else {
            0.0
        };

        let impacts = self.impacts(&current_inputs, &projected_inputs, delta);
        let guidance = select_guidance_template(delta, &impacts);
        let timeline = timeline_label(timeline_months(delta));

        debug!(
            "Simulated scenario: current={} projected={} impacts={}",
            current.max_eligible_amount,
            projected.max_eligible_amount,
            impacts.len()
        );

        SimulationReport {
            current: CapacitySnapshot {
                max_amount: current.max_eligible_amount,
                approval_odds: snapshot_odds(current_inputs.credit_score, false, 85),
            },
            projected: CapacitySnapshot {
                max_amount: projected.max_eligible_amount,
                approval_odds: snapshot_odds(
                    projected_inputs.credit_score,
                    delta.joint_application,
                    95,
                ),
            },
            improvement: Improvement {
                amount: diff,
                percentage,
            },
            impacts,
            guidance: guidance.to_string(),
            timeline: timeline.to_string(),
        }
    }

    /// Apply the actions to today's inputs; living expenses stay as stated
    fn project(&self, current: &CapacityInputs, delta: &SimulationDelta) -> CapacityInputs {
        let joint_income = if delta.joint_application {
            self.config.joint_income_uplift
        } else {
            0.0
        };
        let paid_off = delta.pay_off_debt().min(current.existing_emi * 12.0);

        CapacityInputs {
            monthly_income: current.monthly_income + delta.increase_income() + joint_income,
            existing_emi: (current.existing_emi - paid_off / 12.0).max(0.0),
            credit_score: current
                .credit_score
                .saturating_add(delta.improve_score)
                .min(self.config.score_ceiling.max(current.credit_score)),
            tenure_months: current.tenure_months.saturating_add(delta.wait_months),
            is_joint: delta.joint_application,
            ..current.clone()
        }
    }

    fn impacts(
        &self,
        current: &CapacityInputs,
        projected: &CapacityInputs,
        delta: &SimulationDelta,
    ) -> Vec<Impact> {
        let pay_off = delta.pay_off_debt();
        let increase = delta.increase_income();
        let seasoning = self.policy().employment_risk.seasoning_months;

        let candidates = [
            Impact {
                factor: ImpactFactor::DebtReduction,
                change: if pay_off > 0.0 {
                    (pay_off / 100_000.0 * 10.0).min(DEBT_IMPACT_CAP)
                } else {
                    0.0
                },
                description: format!(
                    "Improves DTI from {:.0}% to {:.0}%",
                    debt_to_income(current.existing_emi, current.monthly_income),
                    debt_to_income(projected.existing_emi, projected.monthly_income)
                ),
            },
            Impact {
                factor: ImpactFactor::IncomeGrowth,
                change: if increase > 0.0 {
                    (increase / 10_000.0 * 5.0).min(INCOME_IMPACT_CAP)
                } else {
                    0.0
                },
                description: format!("Increases available income by {}", format_inr(increase)),
            },
            Impact {
                factor: ImpactFactor::CreditScore,
                change: (delta.improve_score as f64 / 5.0).min(SCORE_IMPACT_CAP),
                description: format!(
                    "Boosts score from {} to {}",
                    current.credit_score, projected.credit_score
                ),
            },
            Impact {
                factor: ImpactFactor::JointApplication,
                change: if delta.joint_application { JOINT_IMPACT } else { 0.0 },
                description: format!(
                    "Combines household income + ERF boost to {:.0}%",
                    self.policy().employment_risk.joint_floor * 100.0
                ),
            },
            Impact {
                factor: ImpactFactor::EmploymentTenure,
                change: if delta.wait_months >= MIN_USEFUL_WAIT_MONTHS
                    && current.tenure_months < seasoning
                {
                    TENURE_IMPACT
                } else {
                    0.0
                },
                description: format!("Waiting builds tenure past {}mo threshold", seasoning),
            },
        ];

        candidates
            .into_iter()
            .filter(|impact| impact.change > 0.0)
            .collect()
    }
}

/// Simulate under the standard policy
pub fn simulate(profile: &ApplicantProfile, delta: &SimulationDelta) -> SimulationReport {
    ScenarioSimulator::default().simulate(profile, delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EmploymentTenure, EmploymentType, ProfileRecord};
    use proptest::prelude::*;

    fn profile(json: &str) -> ApplicantProfile {
        let record: ProfileRecord = serde_json::from_str(json).expect("record parses");
        UnderwritingPolicy::standard().resolve(&record)
    }

    fn base_profile() -> ApplicantProfile {
        profile(
            r#"{"monthlyIncome":40000,"existingEMI":8000,"creditScore":700,
                "employmentType":"salaried","employmentTenure":"1-2yr","tenure":3}"#,
        )
    }

    #[test]
    fn test_empty_delta_changes_nothing() {
        let report = simulate(&base_profile(), &SimulationDelta::default());
        assert_eq!(report.improvement.amount, 0);
        assert_eq!(report.improvement.percentage, 0.0);
        assert_eq!(report.current.max_amount, report.projected.max_amount);
        assert_eq!(report.timeline, "Immediate");
        assert!(report.impacts.is_empty());
        assert_eq!(report.guidance, GENERAL_GUIDANCE);
    }

    #[test]
    fn test_joint_application_dominates_guidance() {
        let delta = SimulationDelta {
            joint_application: true,
            pay_off_debt: 500_000.0,
            ..Default::default()
        };
        let report = simulate(&base_profile(), &delta);
        assert_eq!(report.guidance, JOINT_GUIDANCE);

        let joint = report
            .impacts
            .iter()
            .find(|impact| impact.factor == ImpactFactor::JointApplication)
            .expect("joint impact");
        assert_eq!(joint.change, 30.0);
        assert_eq!(joint.description, "Combines household income + ERF boost to 85%");
        assert!(report.projected.max_amount > report.current.max_amount);
        // 50 + 10 (score 700) + 10 (joint)
        assert_eq!(report.projected.approval_odds, 70);
        assert_eq!(report.current.approval_odds, 60);
    }

    #[test]
    fn test_impacts_are_capped_and_ordered() {
        let delta = SimulationDelta {
            pay_off_debt: 300_000.0,
            increase_income: 80_000.0,
            improve_score: 100,
            wait_months: 12,
            joint_application: false,
        };
        let report = simulate(&base_profile(), &delta);
        let changes: Vec<_> = report
            .impacts
            .iter()
            .map(|impact| (impact.factor, impact.change))
            .collect();
        assert_eq!(
            changes,
            [
                (ImpactFactor::DebtReduction, 20.0),
                (ImpactFactor::IncomeGrowth, 25.0),
                (ImpactFactor::CreditScore, 15.0),
                (ImpactFactor::EmploymentTenure, 15.0),
            ]
        );
        assert_eq!(report.guidance, INCOME_GUIDANCE);
        assert_eq!(report.timeline, "6-12 months");
    }

    #[test]
    fn test_impact_descriptions() {
        let delta = SimulationDelta {
            pay_off_debt: 48_000.0,
            increase_income: 10_000.0,
            improve_score: 30,
            ..Default::default()
        };
        let report = simulate(&base_profile(), &delta);
        let descriptions: Vec<_> = report.impacts.iter().map(|i| i.description.as_str()).collect();
        // EMI 8000 -> 4000, income 40000 -> 50000
        assert_eq!(
            descriptions,
            [
                "Improves DTI from 20% to 8%",
                "Increases available income by ₹10,000",
                "Boosts score from 700 to 730",
            ]
        );
        // 4.8 vs 5.0 vs 6.0
        assert_eq!(report.guidance, CREDIT_GUIDANCE);
        assert_eq!(report.timeline, "1-3 months");
    }

    #[test]
    fn test_guidance_ties_keep_first() {
        let delta = SimulationDelta {
            pay_off_debt: 100_000.0,
            increase_income: 20_000.0,
            ..Default::default()
        };
        // Both impacts are 10 points
        let report = simulate(&base_profile(), &delta);
        assert_eq!(report.guidance, DEBT_GUIDANCE);
    }

    #[test]
    fn test_tenure_only_scenario_uses_general_guidance() {
        let delta = SimulationDelta {
            wait_months: 6,
            ..Default::default()
        };
        let report = simulate(&base_profile(), &delta);
        assert_eq!(report.impacts.len(), 1);
        assert_eq!(report.impacts[0].factor, ImpactFactor::EmploymentTenure);
        assert_eq!(report.guidance, GENERAL_GUIDANCE);
        assert_eq!(report.timeline, "3-6 months");
        // 18 + 6 months crosses seasoning: ERF 0.85 -> 1.0
        assert!(report.projected.max_amount > report.current.max_amount);
    }

    #[test]
    fn test_seasoned_applicant_gains_nothing_from_waiting() {
        let seasoned = ApplicantProfile {
            employment_tenure: EmploymentTenure::TwoToFiveYears,
            ..base_profile()
        };
        let delta = SimulationDelta {
            wait_months: 12,
            ..Default::default()
        };
        let report = simulate(&seasoned, &delta);
        assert!(report.impacts.is_empty());
        assert_eq!(report.improvement.amount, 0);
    }

    #[test]
    fn test_debt_paydown_limited_to_a_year_of_emi() {
        let simulator = ScenarioSimulator::default();
        let current = CapacityInputs::from(&base_profile());
        let projected = simulator.project(
            &current,
            &SimulationDelta {
                pay_off_debt: 1_000_000.0,
                ..Default::default()
            },
        );
        assert_eq!(projected.existing_emi, 0.0);
        let large_payoff = SimulationDelta {
            pay_off_debt: 60_000.0,
            ..Default::default()
        };
        assert_eq!(timeline_months(&large_payoff), 6);
    }

    #[test]
    fn test_score_projection_is_capped() {
        let simulator = ScenarioSimulator::default();
        let current = CapacityInputs::from(&base_profile());
        let projected = simulator.project(
            &current,
            &SimulationDelta {
                improve_score: 400,
                ..Default::default()
            },
        );
        assert_eq!(projected.credit_score, 850);
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let delta = SimulationDelta {
            pay_off_debt: -50_000.0,
            increase_income: -10_000.0,
            ..Default::default()
        };
        let report = simulate(&base_profile(), &delta);
        assert_eq!(report.improvement.amount, 0);
        assert!(report.impacts.is_empty());
    }

    #[test]
    fn test_student_priced_without_surcharge() {
        let student = ApplicantProfile {
            employment_type: EmploymentType::Student,
            ..base_profile()
        };
        let simulator = ScenarioSimulator::default();
        let inputs = CapacityInputs::from(&student);
        let simulated = simulator
            .engine
            .capacity(&inputs, CapacityVariant::SIMULATION);
        assert_eq!(simulated.annual_rate, 11.5);
    }

    #[test]
    fn test_delta_reads_camel_case_json() {
        let json = r#"{"payOffDebt":20000,"jointApplication":true}"#;
        let delta: SimulationDelta = serde_json::from_str(json).expect("delta parses");
        assert_eq!(delta.pay_off_debt, 20_000.0);
        assert!(delta.joint_application);
        assert_eq!(delta.wait_months, 0);
    }

    #[test]
    fn test_delta_tolerates_loose_numbers() {
        let delta: SimulationDelta =
            serde_json::from_str(r#"{"improveScore":-10,"waitMonths":6.0,"payOffDebt":-500}"#)
                .expect("delta parses");
        assert_eq!(delta.improve_score, 0);
        assert_eq!(delta.wait_months, 6);
        assert_eq!(timeline_months(&delta), 6);

        let json = r#"{"improveScore":"40","waitMonths":null}"#;
        let delta: SimulationDelta = serde_json::from_str(json).expect("delta parses");
        assert_eq!(delta.improve_score, 40);
        assert_eq!(delta.wait_months, 0);
    }

    #[test]
    fn test_timeline_buckets() {
        assert_eq!(timeline_label(0), "Immediate");
        assert_eq!(timeline_label(1), "1-3 months");
        assert_eq!(timeline_label(3), "1-3 months");
        assert_eq!(timeline_label(6), "3-6 months");
        assert_eq!(timeline_label(7), "6-12 months");
    }

    proptest! {
        #[test]
        fn prop_additive_actions_never_hurt(
            income in 10_000.0..300_000.0f64,
            emi in 0.0..80_000.0f64,
            score in 300u32..=900,
            pay_off in 0.0..1_000_000.0f64,
            raise in 0.0..100_000.0f64,
            improve in 0u32..200,
            joint in any::<bool>(),
        ) {
            let profile = ApplicantProfile {
                monthly_income: income,
                existing_emi: emi,
                monthly_expenses: (income * 0.3).round(),
                credit_score: score,
                ..base_profile()
            };
            let delta = SimulationDelta {
                pay_off_debt: pay_off,
                increase_income: raise,
                improve_score: improve,
                wait_months: 0,
                joint_application: joint,
            };
            let report = simulate(&profile, &delta);
            prop_assert!(report.projected.max_amount >= report.current.max_amount);
            prop_assert!(report.improvement.amount >= 0);
        }
    }
}
