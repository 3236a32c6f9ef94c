//! Employment risk factors and credit score multipliers

use super::rates::{lookup_band, ScoreBand};
use crate::profile::{EmploymentType, LoanType};
use serde::{Deserialize, Serialize};

/// Employment Risk Factor (ERF) table
///
/// Discounts capacity for less stable income. "Seasoned" means at least
/// `seasoning_months` in the current role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentRisk {
    pub seasoning_months: u32,
    pub salaried_seasoned: f64,
    pub salaried_new: f64,
    /// Shared by self-employed and freelancers
    pub business_seasoned: f64,
    pub business_new: f64,
    pub student: f64,
    pub unknown: f64,
    /// Floor applied when a co-applicant backs the loan
    pub joint_floor: f64,
}

impl Default for EmploymentRisk {
    fn default() -> Self {
        Self {
            seasoning_months: 24,
            salaried_seasoned: 1.00,
            salaried_new: 0.85,
            business_seasoned: 0.75,
            business_new: 0.60,
            student: 0.40,
            unknown: 0.60,
            joint_floor: 0.85,
        }
    }
}

/// When the joint-application ERF floor applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointFloorRule {
    /// Only education loans with a co-applicant (underwriting report)
    EducationLoansOnly,
    /// Any joint application (scenario optimizer)
    AnyLoan,
}

impl EmploymentRisk {
    /// Base ERF from employment type and months in role
    pub fn base_factor(&self, employment: EmploymentType, tenure_months: u32) -> f64 {
        let seasoned = tenure_months >= self.seasoning_months;
        match employment {
            EmploymentType::Salaried if seasoned => self.salaried_seasoned,
            EmploymentType::Salaried => self.salaried_new,
            EmploymentType::SelfEmployed | EmploymentType::Freelancer if seasoned => {
                self.business_seasoned
            }
            EmploymentType::SelfEmployed | EmploymentType::Freelancer => self.business_new,
            EmploymentType::Student => self.student,
            EmploymentType::Other => self.unknown,
        }
    }

    /// ERF including the joint-application floor
    pub fn factor(
        &self,
        employment: EmploymentType,
        tenure_months: u32,
        loan_type: LoanType,
        is_joint: bool,
        rule: JointFloorRule,
    ) -> f64 {
        let erf = self.base_factor(employment, tenure_months);
        let floor_applies = is_joint
            && match rule {
                JointFloorRule::EducationLoansOnly => loan_type == LoanType::Education,
                JointFloorRule::AnyLoan => true,
            };
        if floor_applies {
            erf.max(self.joint_floor)
        } else {
            erf
        }
    }
}

/// Outcome of the Credit Score Multiplier stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditMultiplier {
    pub csm: f64,
    pub rejected: bool,
}

/// Credit Score Multiplier (CSM) table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditMultipliers {
    /// Sorted by descending `min_score`; scores below the last band are rejected
    bands: Vec<ScoreBand>,
    /// Flat multiplier for new-to-credit applicants, overriding the bands
    pub no_history: f64,
}

impl CreditMultipliers {
    pub fn new(mut bands: Vec<ScoreBand>, no_history: f64) -> Self {
        bands.sort_by(|a, b| b.min_score.cmp(&a.min_score));
        Self { bands, no_history }
    }

    pub fn standard() -> Self {
        Self::new(
            vec![
                ScoreBand::new(780, 1.00),
                ScoreBand::new(720, 0.90),
                ScoreBand::new(680, 0.80),
            ],
            0.50,
        )
    }

    pub fn bands(&self) -> &[ScoreBand] {
        &self.bands
    }

    /// Lowest score that avoids automatic rejection
    pub fn rejection_threshold(&self) -> u32 {
        self.bands.iter().map(|band| band.min_score).min().unwrap_or(0)
    }

    pub fn multiplier(&self, credit_score: u32, has_credit_history: bool) -> CreditMultiplier {
        if !has_credit_history {
            return CreditMultiplier {
                csm: self.no_history,
                rejected: false,
            };
        }
        match lookup_band(&self.bands, credit_score) {
            Some(csm) => CreditMultiplier { csm, rejected: false },
            None => CreditMultiplier {
                csm: 0.0,
                rejected: true,
            },
        }
    }
}

impl Default for CreditMultipliers {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erf_by_employment_and_tenure() {
        let risk = EmploymentRisk::default();
        assert_eq!(risk.base_factor(EmploymentType::Salaried, 42), 1.00);
        assert_eq!(risk.base_factor(EmploymentType::Salaried, 24), 1.00);
        assert_eq!(risk.base_factor(EmploymentType::Salaried, 18), 0.85);
        assert_eq!(risk.base_factor(EmploymentType::SelfEmployed, 72), 0.75);
        assert_eq!(risk.base_factor(EmploymentType::Freelancer, 9), 0.60);
        assert_eq!(risk.base_factor(EmploymentType::Student, 72), 0.40);
        assert_eq!(risk.base_factor(EmploymentType::Other, 72), 0.60);
    }

    #[test]
    fn test_joint_floor_rules() {
        let risk = EmploymentRisk::default();
        let student = EmploymentType::Student;

        let education_only = JointFloorRule::EducationLoansOnly;
        let education = risk.factor(student, 3, LoanType::Education, true, education_only);
        assert_eq!(education, 0.85);

        let personal = risk.factor(student, 3, LoanType::Personal, true, education_only);
        assert_eq!(personal, 0.40);

        let optimizer = risk.factor(student, 3, LoanType::Personal, true, JointFloorRule::AnyLoan);
        assert_eq!(optimizer, 0.85);

        let single = risk.factor(student, 3, LoanType::Education, false, JointFloorRule::AnyLoan);
        assert_eq!(single, 0.40);

        // Floor never lowers a stronger factor
        let seasoned = risk.factor(
            EmploymentType::Salaried,
            72,
            LoanType::Education,
            true,
            JointFloorRule::AnyLoan,
        );
        assert_eq!(seasoned, 1.00);
    }

    #[test]
    fn test_credit_multiplier_bands() {
        let table = CreditMultipliers::standard();
        assert_eq!(table.multiplier(780, true), CreditMultiplier { csm: 1.00, rejected: false });
        assert_eq!(table.multiplier(750, true), CreditMultiplier { csm: 0.90, rejected: false });
        assert_eq!(table.multiplier(680, true), CreditMultiplier { csm: 0.80, rejected: false });
        assert_eq!(table.multiplier(679, true), CreditMultiplier { csm: 0.0, rejected: true });
        assert_eq!(table.rejection_threshold(), 680);
    }

    #[test]
    fn test_no_history_overrides_score() {
        let table = CreditMultipliers::standard();
        assert_eq!(table.multiplier(820, false), CreditMultiplier { csm: 0.50, rejected: false });
        assert_eq!(table.multiplier(400, false), CreditMultiplier { csm: 0.50, rejected: false });
    }
}
