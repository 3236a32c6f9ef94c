//! Applicant profile data, loading and persistence

mod data;
pub mod loader;
pub mod store;

pub use data::{
    debt_to_income, ApplicantProfile, EmploymentTenure, EmploymentType, LoanType, ProfileRecord,
};
pub(crate) use data::{lenient_count, lenient_whole_number};
pub use loader::{load_applicants, load_applicants_from_reader, load_record_json, Applicant};
pub use store::{JsonFileProfileStore, MemoryProfileStore, ProfileStore, StoredProfile};
