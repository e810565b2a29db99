//! Gateway: JSON command dispatch over the bindings.
//!
//! | command | args |
//! |---|---|
//! | `save_recommendations` | `{analysisId, recommendations}` |
//! | `get_recommendations` | `{analysisId}` |
//! | `update_recommendation_status` | `{recordId, status}` |
//! | `audit_recommendations` | `{analysisId, expectedCount}` or `{analysisId, expectedIds}` |
//! | `health_check` | none |
//! | `health_metrics` | none |
//! | `health_reset` | none |
//! | `verify_flow` | `{records?}` |

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use vigil_core::errors::VigilError;

use crate::bindings::{flow, health, recommendations};
use crate::conversions::error_types::{bad_request, Failure};
use crate::runtime::VigilRuntime;

pub const COMMANDS: [&str; 8] = [
    "save_recommendations",
    "get_recommendations",
    "update_recommendation_status",
    "audit_recommendations",
    "health_check",
    "health_metrics",
    "health_reset",
    "verify_flow",
];

#[derive(Clone)]
pub struct Gateway {
    runtime: Arc<VigilRuntime>,
}

impl Gateway {
    pub fn new(runtime: Arc<VigilRuntime>) -> Self {
        Self { runtime }
    }

    /// Gateway over the process-wide runtime.
    pub fn global() -> Result<Self, VigilError> {
        crate::runtime::get().map(Self::new)
    }

    pub fn runtime(&self) -> &Arc<VigilRuntime> {
        &self.runtime
    }

    /// Route one command. Always answers with a JSON object; an unknown
    /// command or unreadable arguments yield `success: false`.
    pub async fn dispatch(&self, command: &str, args: &Value) -> Value {
        tracing::debug!(command, "gateway dispatch");
        let rt = self.runtime.as_ref();
        match command {
            "save_recommendations" => {
                let records = arg(args, &["recommendations", "records"]);
                to_json(
                    recommendations::save_recommendations(rt, arg(args, &["analysisId"]), records)
                        .await,
                )
            }
            "get_recommendations" => {
                to_json(recommendations::get_recommendations(rt, arg(args, &["analysisId"])).await)
            }
            "update_recommendation_status" => to_json(
                recommendations::update_recommendation_status(
                    rt,
                    arg(args, &["recordId", "id"]),
                    arg(args, &["status"]),
                )
                .await,
            ),
            "audit_recommendations" => to_json(
                recommendations::audit_recommendations(
                    rt,
                    arg(args, &["analysisId"]),
                    arg(args, &["expectedIds", "expectedCount"]),
                )
                .await,
            ),
            "health_check" => to_json(health::health_check(rt).await),
            "health_metrics" => to_json(health::health_metrics(rt)),
            "health_reset" => to_json(health::health_reset(rt)),
            "verify_flow" => match arg(args, &["records"]) {
                Value::Null => to_json(flow::verify_flow(rt, None).await),
                Value::Number(n) => match n.as_u64() {
                    Some(count) => to_json(flow::verify_flow(rt, Some(count as usize)).await),
                    None => rejected(&bad_request(format!("records must be a count, got {n}"))),
                },
                _ => rejected(&bad_request("records must be a count")),
            },
            other => rejected(&bad_request(format!(
                "unknown command '{other}', expected one of: {}",
                COMMANDS.join(", ")
            ))),
        }
    }
}

static NULL: Value = Value::Null;

/// First present key among `names`, or null.
fn arg<'a>(args: &'a Value, names: &[&str]) -> &'a Value {
    names
        .iter()
        .find_map(|name| args.get(*name).filter(|v| !v.is_null()))
        .unwrap_or(&NULL)
}

fn to_json<T: Serialize>(response: T) -> Value {
    serde_json::to_value(response)
        .unwrap_or_else(|e| rejected(&VigilError::SerializationError(e)))
}

fn rejected(err: &VigilError) -> Value {
    let mut body = json!({ "success": false });
    if let (Value::Object(map), Ok(Value::Object(extra))) =
        (&mut body, serde_json::to_value(Failure::from_error(err)))
    {
        map.extend(extra);
    }
    body
}
