//! AWS Lambda handler for dashboard calculations
//!
//! Accepts a single stored record as JSON, tagged with the calculation to run:
//!
//! ```json
//! {"kind": "cashFlow", "id": "s1", "monthlyIncome": 5000, ...}
//! {"kind": "retirement", "id": "p1", "userId": "u1", "currentAge": 30, ...}
//! ```
//!
//! Returns the derived record, or `{"error": "..."}` when the request cannot be
//! parsed or the plan fails validation.

use finance_projection::{calculate_metrics, calculate_projection, CashFlowSnapshot, RetirementPlan};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::{json, Value};

/// Calculation requested by the caller
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum CalculationRequest {
    CashFlow(CashFlowSnapshot),
    Retirement(RetirementPlan),
}

fn error_response(message: String) -> Value {
    json!({ "error": message })
}

fn respond(payload: Value) -> Value {
    let request: CalculationRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(e) => return error_response(format!("invalid request: {}", e)),
    };

    let result = match request {
        CalculationRequest::CashFlow(snapshot) => serde_json::to_value(calculate_metrics(&snapshot)),
        CalculationRequest::Retirement(plan) => match calculate_projection(&plan) {
            Ok(projection) => serde_json::to_value(projection),
            Err(e) => {
                log::warn!("plan {} rejected: {}", plan.id, e);
                return error_response(e.to_string());
            }
        },
    };

    result.unwrap_or_else(|e| error_response(format!("serialization failed: {}", e)))
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(respond(event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
