//! Load applicant records from CSV batches or stored JSON documents

use super::{lenient_whole_number, ProfileRecord};
use crate::error::{EligibilityError, Result};
use csv::Reader;
use std::fs::File;
use std::path::Path;

/// Default location of the batch input file
pub const DEFAULT_PROFILES_PATH: &str = "data/applicants.csv";

/// Raw CSV row; blank cells become `None` and are defaulted later
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "applicantId")]
    applicant_id: String,
    #[serde(rename = "monthlyIncome")]
    monthly_income: Option<f64>,
    #[serde(rename = "existingEMI")]
    existing_emi: Option<f64>,
    #[serde(rename = "monthlyExpenses")]
    monthly_expenses: Option<f64>,
    #[serde(rename = "loanAmount")]
    loan_amount: Option<f64>,
    #[serde(rename = "tenure", default, deserialize_with = "lenient_whole_number")]
    tenure: Option<u32>,
    #[serde(rename = "creditScore", default, deserialize_with = "lenient_whole_number")]
    credit_score: Option<u32>,
    #[serde(rename = "hasCreditHistory")]
    has_credit_history: Option<bool>,
    #[serde(rename = "employmentType")]
    employment_type: Option<String>,
    #[serde(rename = "employmentTenure")]
    employment_tenure: Option<String>,
    #[serde(rename = "isJointApplication")]
    is_joint_application: Option<bool>,
    #[serde(rename = "coborrowerIncome")]
    coborrower_income: Option<f64>,
    #[serde(rename = "loanType")]
    loan_type: Option<String>,
}

impl CsvRow {
    fn into_applicant(self) -> Applicant {
        let blank_to_none = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Applicant {
            applicant_id: self.applicant_id,
            record: ProfileRecord {
                monthly_income: self.monthly_income,
                existing_emi: self.existing_emi,
                monthly_expenses: self.monthly_expenses,
                loan_amount: self.loan_amount,
                tenure: self.tenure,
                credit_score: self.credit_score,
                has_credit_history: self.has_credit_history,
                employment_type: blank_to_none(self.employment_type),
                employment_tenure: blank_to_none(self.employment_tenure),
                is_joint_application: self.is_joint_application,
                coborrower_income: self.coborrower_income,
                loan_type: blank_to_none(self.loan_type),
            },
        }
    }
}

/// An identified onboarding record from a batch file
#[derive(Debug, Clone, PartialEq)]
pub struct Applicant {
    pub applicant_id: String,
    pub record: ProfileRecord,
}

/// Load all applicants from a CSV file
pub fn load_applicants<P: AsRef<Path>>(path: P) -> Result<Vec<Applicant>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| EligibilityError::io(path, source))?;
    load_applicants_from_reader(file)
}

/// Load applicants from any reader (e.g., string buffer, network stream)
pub fn load_applicants_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Applicant>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut applicants = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        applicants.push(row.into_applicant());
    }

    Ok(applicants)
}

/// Load a single onboarding record stored as JSON
pub fn load_record_json<P: AsRef<Path>>(path: P) -> Result<ProfileRecord> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| EligibilityError::io(path, source))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "\
applicantId,monthlyIncome,existingEMI,monthlyExpenses,loanAmount,tenure,creditScore,hasCreditHistory,employmentType,employmentTenure,isJointApplication,coborrowerIncome,loanType
A-1,50000,5000,,800000,5,750,true,salaried,2-5yr,false,,personal
A-2,,,,,,600,true,,,,,
A-3,40000,0,15000,,3,,false,student,<6_months,true,35000,education
";

    #[test]
    fn test_load_applicants() {
        let applicants = load_applicants_from_reader(BATCH.as_bytes()).expect("batch parses");
        assert_eq!(applicants.len(), 3);

        let first = &applicants[0];
        assert_eq!(first.applicant_id, "A-1");
        assert_eq!(first.record.monthly_income, Some(50_000.0));
        assert_eq!(first.record.monthly_expenses, None);
        assert_eq!(first.record.employment_tenure.as_deref(), Some("2-5yr"));
        assert_eq!(first.record.coborrower_income, None);

        let sparse = &applicants[1];
        assert_eq!(sparse.record.monthly_income, None);
        assert_eq!(sparse.record.credit_score, Some(600));
        assert_eq!(sparse.record.employment_type, None);
        assert_eq!(sparse.record.has_credit_history, Some(true));

        let joint = &applicants[2];
        assert_eq!(joint.record.is_joint_application, Some(true));
        assert_eq!(joint.record.coborrower_income, Some(35_000.0));
        assert_eq!(joint.record.loan_type.as_deref(), Some("education"));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let data = "applicantId,monthlyIncome,existingEMI,monthlyExpenses,loanAmount,tenure,creditScore,hasCreditHistory,employmentType,employmentTenure,isJointApplication,coborrowerIncome,loanType\n\
                    A-1,lots,,,,,,,,,,,\n";
        assert!(matches!(
            load_applicants_from_reader(data.as_bytes()),
            Err(EligibilityError::Csv(_))
        ));
    }

    #[test]
    fn test_sample_batch_loads() {
        let applicants = load_applicants(DEFAULT_PROFILES_PATH).expect("sample batch loads");
        assert_eq!(applicants.len(), 8);
        assert!(applicants.iter().all(|a| a.applicant_id.starts_with("APP-")));
    }

    #[test]
    fn test_missing_json_file() {
        let err = load_record_json("does/not/exist.json").unwrap_err();
        assert!(matches!(err, EligibilityError::Io { .. }));
    }
}
