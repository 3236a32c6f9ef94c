//! Loan Eligibility - bank-grade credit capacity engine for Indian retail borrowers
//!
//! This library provides:
//! - A seven-stage loan capacity model (employment risk, debt-service gates,
//!   amortization, credit score multipliers, income caps)
//! - Detailed eligibility reports and a compact dashboard summary
//! - Lender offer comparison priced off the same rate table
//! - A what-if simulator for debt payoff, income growth, score improvement,
//!   seasoning and joint applications
//! - Onboarding record loading (CSV/JSON) and a key-value profile store

pub mod error;
pub mod format;
pub mod profile;
pub mod underwriting;
pub mod eligibility;
pub mod offers;
pub mod scenario;

// Re-export commonly used types
pub use error::{EligibilityError, Result};
pub use profile::{ApplicantProfile, ProfileRecord, ProfileStore};
pub use underwriting::UnderwritingPolicy;
pub use eligibility::{compute_eligibility, DashboardSummary, EligibilityEngine, EligibilityReport};
pub use offers::{compare_lenders, LenderOffer};
pub use scenario::{simulate, ScenarioSimulator, SimulationDelta, SimulationReport};
