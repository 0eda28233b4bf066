//! Function: healthCheck
//!
//! Ignores its arguments and reports a fixed status structure.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::invoke::{Context, HandlerError};

pub const FUNCTION: &str = "healthCheck";

/// Body returned by `healthCheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub component: String,
    /// RFC 3339, UTC, whole seconds.
    pub timestamp: String,
    pub call_id: String,
}

pub fn handle<S>(ctx: &Context<'_, S>) -> Result<Vec<u8>, HandlerError> {
    let status = HealthStatus {
        status: "OK".to_string(),
        component: ctx.config().component_name.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        call_id: ctx.call_id().to_string(),
    };
    Ok(serde_json::to_vec(&status)?)
}
