//! Interest-rate pricing by credit score band and employment type

use crate::profile::EmploymentType;
use serde::{Deserialize, Serialize};

/// A threshold row: applies to scores at or above `min_score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBand {
    pub min_score: u32,
    pub value: f64,
}

impl ScoreBand {
    pub const fn new(min_score: u32, value: f64) -> Self {
        Self { min_score, value }
    }
}

/// Value of the highest band the score qualifies for
pub(crate) fn lookup_band(bands: &[ScoreBand], score: u32) -> Option<f64> {
    bands
        .iter()
        .filter(|band| score >= band.min_score)
        .max_by_key(|band| band.min_score)
        .map(|band| band.value)
}

/// Which employment surcharges are applied on top of the base rate
///
/// The underwriting report prices students at +2%, while the scenario
/// optimizer historically left the student surcharge out. Both schedules are
/// kept so each caller reproduces its own pricing; the mismatch is an open
/// product decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeSchedule {
    Full,
    ExcludingStudent,
}

/// Annual rate add-ons (percentage points) by employment type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentSurcharges {
    pub self_employed: f64,
    pub freelancer: f64,
    pub student: f64,
}

impl Default for EmploymentSurcharges {
    fn default() -> Self {
        Self {
            self_employed: 0.5,
            freelancer: 1.0,
            student: 2.0,
        }
    }
}

impl EmploymentSurcharges {
    pub fn for_employment(&self, employment: EmploymentType, schedule: SurchargeSchedule) -> f64 {
        match (employment, schedule) {
            (EmploymentType::SelfEmployed, _) => self.self_employed,
            (EmploymentType::Freelancer, _) => self.freelancer,
            (EmploymentType::Student, SurchargeSchedule::Full) => self.student,
            _ => 0.0,
        }
    }
}

/// Annual base rate (percent) by credit score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    /// Sorted by descending `min_score`
    bands: Vec<ScoreBand>,
    /// Rate for scores below every band
    floor_rate: f64,
    pub surcharges: EmploymentSurcharges,
}

impl RateTable {
    /// Build from bands in any order
    pub fn new(
        mut bands: Vec<ScoreBand>,
        floor_rate: f64,
        surcharges: EmploymentSurcharges,
    ) -> Self {
        bands.sort_by(|a, b| b.min_score.cmp(&a.min_score));
        Self { bands, floor_rate, surcharges }
    }

    /// Retail personal-loan pricing
    pub fn standard() -> Self {
        Self::new(
            vec![
                ScoreBand::new(800, 9.5),
                ScoreBand::new(750, 10.5),
                ScoreBand::new(700, 11.5),
                ScoreBand::new(650, 12.5),
            ],
            14.0,
            EmploymentSurcharges::default(),
        )
    }

    pub fn bands(&self) -> &[ScoreBand] {
        &self.bands
    }

    pub fn floor_rate(&self) -> f64 {
        self.floor_rate
    }

    /// Base rate before any employment surcharge
    pub fn base_rate(&self, credit_score: u32) -> f64 {
        lookup_band(&self.bands, credit_score).unwrap_or(self.floor_rate)
    }

    /// Base rate plus the employment surcharge under the given schedule
    pub fn annual_rate(
        &self,
        credit_score: u32,
        employment: EmploymentType,
        schedule: SurchargeSchedule,
    ) -> f64 {
        self.base_rate(credit_score) + self.surcharges.for_employment(employment, schedule)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}
