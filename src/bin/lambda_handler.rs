//! AWS Lambda handler for eligibility requests
//!
//! Accepts an onboarding record plus an `action` and returns the detailed
//! report, a what-if simulation, or the dashboard summary as JSON.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use loan_eligibility::eligibility::{DashboardSummary, EligibilityEngine, EligibilityReport};
use loan_eligibility::scenario::{ScenarioSimulator, SimulationDelta, SimulationReport};
use loan_eligibility::{ProfileRecord, UnderwritingPolicy};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable pointing at a directory of underwriting tables
const POLICY_DIR_ENV: &str = "UNDERWRITING_POLICY_DIR";

/// Request body, dispatched on `action`
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum EligibilityRequest {
    Eligibility {
        #[serde(default)]
        profile: ProfileRecord,
    },
    #[serde(rename_all = "camelCase")]
    Simulate {
        #[serde(default)]
        profile: ProfileRecord,
        #[serde(default)]
        delta: SimulationDelta,
    },
    #[serde(rename_all = "camelCase")]
    Dashboard {
        #[serde(default)]
        profile: ProfileRecord,
        #[serde(default)]
        uploaded_documents: u32,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum EligibilityResult {
    Eligibility(EligibilityReport),
    Simulation(SimulationReport),
    Dashboard(DashboardSummary),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EligibilityResponse {
    #[serde(flatten)]
    result: EligibilityResult,
    execution_time_ms: u64,
}

/// Engine state built once per cold start
struct Services {
    engine: EligibilityEngine,
    simulator: ScenarioSimulator,
}

impl Services {
    fn load() -> Result<Self, Error> {
        let policy = match std::env::var(POLICY_DIR_ENV) {
            Ok(dir) => {
                info!("Loading underwriting tables from {}", dir);
                UnderwritingPolicy::from_csv_path(Path::new(&dir))?
            }
            Err(_) => UnderwritingPolicy::standard(),
        };
        Ok(Self {
            engine: EligibilityEngine::new(policy.clone()),
            simulator: ScenarioSimulator::new(policy),
        })
    }

    fn dispatch(&self, request: EligibilityRequest) -> EligibilityResult {
        match request {
            EligibilityRequest::Eligibility { profile } => {
                EligibilityResult::Eligibility(self.engine.assess_record(&profile))
            }
            EligibilityRequest::Simulate { profile, delta } => {
                let profile = self.simulator.policy().resolve(&profile);
                EligibilityResult::Simulation(self.simulator.simulate(&profile, &delta))
            }
            EligibilityRequest::Dashboard {
                profile,
                uploaded_documents,
            } => {
                let profile = self.engine.policy().resolve(&profile);
                EligibilityResult::Dashboard(self.engine.summarize(&profile, uploaded_documents))
            }
        }
    }
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &EligibilityResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(services: &Services, event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: EligibilityRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected request body: {}", e);
            return error_response(400, &format!("Invalid JSON: {}", e));
        }
    };

    let result = services.dispatch(request);
    let response = EligibilityResponse {
        result,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let services = Services::load()?;
    let services = &services;
    run(service_fn(move |event: Request| async move {
        handler(services, event).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_dispatch_by_action() {
        let json = r#"{"action":"simulate","profile":{"monthlyIncome":40000},
                       "delta":{"jointApplication":true}}"#;
        let request: EligibilityRequest = serde_json::from_str(json).expect("request parses");
        let services = Services {
            engine: EligibilityEngine::standard(),
            simulator: ScenarioSimulator::default(),
        };
        match services.dispatch(request) {
            EligibilityResult::Simulation(report) => {
                assert_eq!(report.guidance, loan_eligibility::scenario::JOINT_GUIDANCE)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_dashboard_request_reads_documents() {
        let json = r#"{"action":"dashboard","uploadedDocuments":5}"#;
        let request: EligibilityRequest = serde_json::from_str(json).expect("request parses");
        let services = Services {
            engine: EligibilityEngine::standard(),
            simulator: ScenarioSimulator::default(),
        };
        match services.dispatch(request) {
            EligibilityResult::Dashboard(summary) => assert_eq!(summary.document_readiness, 100),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let parsed = serde_json::from_str::<EligibilityRequest>(r#"{"action":"chat"}"#);
        assert!(parsed.is_err());
    }
}
