//! Applicant profile structures matching the onboarding record format

use serde::{Deserialize, Deserializer, Serialize};

/// Employment category of the primary applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    Freelancer,
    Student,
    /// Any employment string the onboarding flow did not recognize
    Other,
}

impl EmploymentType {
    /// Parse the onboarding value, returning `None` for unrecognized strings
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "salaried" => Some(EmploymentType::Salaried),
            "self_employed" => Some(EmploymentType::SelfEmployed),
            "freelancer" => Some(EmploymentType::Freelancer),
            "student" => Some(EmploymentType::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::Salaried => "salaried",
            EmploymentType::SelfEmployed => "self_employed",
            EmploymentType::Freelancer => "freelancer",
            EmploymentType::Student => "student",
            EmploymentType::Other => "other",
        }
    }

    /// Display label used in report descriptions
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::Salaried => "Salaried",
            EmploymentType::SelfEmployed => "Self-employed",
            EmploymentType::Freelancer => "Freelancer",
            EmploymentType::Student => "Student",
            EmploymentType::Other => "Other",
        }
    }
}

/// Time in the current job, as captured by the onboarding questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentTenure {
    #[serde(rename = "<6_months")]
    UnderSixMonths,
    #[serde(rename = "6m-1yr")]
    SixToTwelveMonths,
    #[serde(rename = "1-2yr")]
    OneToTwoYears,
    #[serde(rename = "2-5yr")]
    TwoToFiveYears,
    #[serde(rename = "5+yr")]
    OverFiveYears,
    /// Unrecognized answer, treated like 1-2 years
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl EmploymentTenure {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "<6_months" => Some(EmploymentTenure::UnderSixMonths),
            "6m-1yr" => Some(EmploymentTenure::SixToTwelveMonths),
            "1-2yr" => Some(EmploymentTenure::OneToTwoYears),
            "2-5yr" => Some(EmploymentTenure::TwoToFiveYears),
            "5+yr" => Some(EmploymentTenure::OverFiveYears),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentTenure::UnderSixMonths => "<6_months",
            EmploymentTenure::SixToTwelveMonths => "6m-1yr",
            EmploymentTenure::OneToTwoYears => "1-2yr",
            EmploymentTenure::TwoToFiveYears => "2-5yr",
            EmploymentTenure::OverFiveYears => "5+yr",
            EmploymentTenure::Unrecognized => "unrecognized",
        }
    }

    /// Representative number of months for the tenure bucket
    pub fn months(&self) -> u32 {
        match self {
            EmploymentTenure::UnderSixMonths => 3,
            EmploymentTenure::SixToTwelveMonths => 9,
            EmploymentTenure::OneToTwoYears => 18,
            EmploymentTenure::TwoToFiveYears => 42,
            EmploymentTenure::OverFiveYears => 72,
            EmploymentTenure::Unrecognized => 18,
        }
    }
}

/// Purpose of the requested loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Personal,
    Education,
    Home,
    Vehicle,
    Business,
    Other,
}

impl LoanType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "personal" => Some(LoanType::Personal),
            "education" => Some(LoanType::Education),
            "home" => Some(LoanType::Home),
            "vehicle" | "car" => Some(LoanType::Vehicle),
            "business" => Some(LoanType::Business),
            _ => None,
        }
    }
}

/// Raw onboarding record as persisted by the client
///
/// Every field is optional; missing or unusable values are replaced by
/// [`crate::underwriting::ProfileDefaults`] when the record is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub monthly_income: Option<f64>,
    #[serde(rename = "existingEMI")]
    pub existing_emi: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub loan_amount: Option<f64>,
    /// Requested repayment term in years
    #[serde(deserialize_with = "lenient_whole_number")]
    pub tenure: Option<u32>,
    #[serde(deserialize_with = "lenient_whole_number")]
    pub credit_score: Option<u32>,
    pub has_credit_history: Option<bool>,
    pub employment_type: Option<String>,
    pub employment_tenure: Option<String>,
    pub is_joint_application: Option<bool>,
    pub coborrower_income: Option<f64>,
    pub loan_type: Option<String>,
}

/// A fully resolved applicant profile
///
/// Constructed through [`crate::underwriting::ProfileDefaults::resolve`], so
/// every field already holds a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    /// Primary applicant's monthly income (always positive)
    pub monthly_income: f64,

    /// Existing monthly debt obligations
    #[serde(rename = "existingEMI")]
    pub existing_emi: f64,

    /// Monthly living expenses
    pub monthly_expenses: f64,

    /// Requested loan amount (display and lender comparison only)
    pub loan_amount: f64,

    /// Repayment term in years
    pub tenure_years: u32,

    /// Bureau score in [300, 900]
    pub credit_score: u32,

    pub has_credit_history: bool,

    pub employment_type: EmploymentType,

    pub employment_tenure: EmploymentTenure,

    pub is_joint_application: bool,

    /// Co-borrower monthly income; zero unless a joint application
    pub coborrower_income: f64,

    pub loan_type: LoanType,
}

impl ApplicantProfile {
    /// Months in the current job
    pub fn tenure_months(&self) -> u32 {
        self.employment_tenure.months()
    }

    /// Loan term in months
    pub fn term_months(&self) -> u32 {
        self.tenure_years.saturating_mul(12)
    }

    /// Existing obligations as a percentage of income (0 when undefined)
    pub fn dti(&self) -> f64 {
        debt_to_income(self.existing_emi, self.monthly_income)
    }
}

/// Debt-to-income percentage, guarded against zero income and non-finite results
pub fn debt_to_income(existing_emi: f64, monthly_income: f64) -> f64 {
    if monthly_income <= 0.0 {
        return 0.0;
    }
    let dti = existing_emi / monthly_income * 100.0;
    if dti.is_finite() {
        dti.max(0.0)
    } else {
        0.0
    }
}

/// Read a whole number from any numeric form a client may send
///
/// Fractions are rounded, numeric strings are parsed and oversized values
/// saturate. Negative, non-finite or non-numeric values read as absent.
pub(crate) fn lenient_whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Raw::Other(_)) | None => None,
    };
    Ok(value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32))
}

/// Like [`lenient_whole_number`], reading absent values as zero
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_whole_number(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tenure_months_mapping() {
        assert_eq!(EmploymentTenure::parse("<6_months").map(|t| t.months()), Some(3));
        assert_eq!(EmploymentTenure::parse("6m-1yr").map(|t| t.months()), Some(9));
        assert_eq!(EmploymentTenure::parse("1-2yr").map(|t| t.months()), Some(18));
        assert_eq!(EmploymentTenure::parse("2-5yr").map(|t| t.months()), Some(42));
        assert_eq!(EmploymentTenure::parse("5+yr").map(|t| t.months()), Some(72));
        assert_eq!(EmploymentTenure::parse("a while"), None);
        assert_eq!(EmploymentTenure::Unrecognized.months(), 18);
    }

    #[test]
    fn test_employment_parse() {
        assert_eq!(EmploymentType::parse("self_employed"), Some(EmploymentType::SelfEmployed));
        assert_eq!(EmploymentType::parse(" student "), Some(EmploymentType::Student));
        assert_eq!(EmploymentType::parse("gig"), None);
    }

    #[test]
    fn test_dti_guards() {
        assert_relative_eq!(debt_to_income(5000.0, 50000.0), 10.0, epsilon = 1e-9);
        assert_eq!(debt_to_income(5000.0, 0.0), 0.0);
        assert_eq!(debt_to_income(f64::NAN, 50000.0), 0.0);
        assert_eq!(debt_to_income(f64::INFINITY, 50000.0), 0.0);
    }

    #[test]
    fn test_record_reads_onboarding_json() {
        let json = r#"{
            "monthlyIncome": 50000,
            "existingEMI": 5000,
            "creditScore": 750,
            "employmentType": "salaried",
            "employmentTenure": "2-5yr",
            "tenure": 5,
            "hasCreditHistory": true
        }"#;
        let record: ProfileRecord = serde_json::from_str(json).expect("record parses");
        assert_eq!(record.monthly_income, Some(50000.0));
        assert_eq!(record.existing_emi, Some(5000.0));
        assert_eq!(record.credit_score, Some(750));
        assert_eq!(record.employment_tenure.as_deref(), Some("2-5yr"));
        assert_eq!(record.monthly_expenses, None);
        assert_eq!(record.is_joint_application, None);
    }

    #[test]
    fn test_record_tolerates_loose_numbers() {
        let record: ProfileRecord =
            serde_json::from_str(r#"{"creditScore": 712.0, "tenure": -1}"#).expect("record parses");
        assert_eq!(record.credit_score, Some(712));
        assert_eq!(record.tenure, None);

        let record: ProfileRecord =
            serde_json::from_str(r#"{"creditScore": -5, "tenure": "4"}"#).expect("record parses");
        assert_eq!(record.credit_score, None);
        assert_eq!(record.tenure, Some(4));

        let json = r#"{"creditScore": null, "tenure": true}"#;
        let record: ProfileRecord = serde_json::from_str(json).expect("record parses");
        assert_eq!(record.credit_score, None);
        assert_eq!(record.tenure, None);
    }

    #[test]
    fn test_term_months_saturates() {
        let record = ProfileRecord::default();
        let mut profile = crate::underwriting::ProfileDefaults::default().resolve(&record);
        profile.tenure_years = u32::MAX;
        assert_eq!(profile.term_months(), u32::MAX);
    }
}
