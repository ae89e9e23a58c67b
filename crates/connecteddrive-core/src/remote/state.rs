//! Execution state of a submitted remote service.

use std::fmt;

use serde::Deserialize;

use crate::api::ApiError;

/// Status value reported once the vehicle has carried out the service
pub const EXECUTED: &str = "EXECUTED";

/// `remoteServiceStatus` as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteServiceStatus {
    Executed,
    /// Any other value, e.g. `PENDING` or `DELIVERED_TO_VEHICLE`
    InProgress(String),
}

impl RemoteServiceStatus {
    pub fn is_executed(&self) -> bool {
        matches!(self, RemoteServiceStatus::Executed)
    }
}

impl fmt::Display for RemoteServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteServiceStatus::Executed => f.write_str(EXECUTED),
            RemoteServiceStatus::InProgress(status) => f.write_str(status),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExecutionStateDocument {
    #[serde(rename = "remoteServiceStatus")]
    remote_service_status: String,
}

/// Parse the XML body of `/remoteservices/v1/{vin}/state/execution`.
///
/// Only the `remoteServiceStatus` child of the root element is read.
pub fn parse_execution_state(body: &str) -> Result<RemoteServiceStatus, ApiError> {
    let doc: ExecutionStateDocument = quick_xml::de::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("execution state: {}", e)))?;

    let status = doc.remote_service_status.trim();
    if status.is_empty() {
        return Err(ApiError::InvalidResponse(
            "execution state: empty remoteServiceStatus".to_string(),
        ));
    }

    Ok(if status == EXECUTED {
        RemoteServiceStatus::Executed
    } else {
        RemoteServiceStatus::InProgress(status.to_string())
    })
}

/// Lifecycle of a single remote service execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Submitted,
    Polling { attempt: u32 },
    Executed,
    TimedOut,
    CommunicationError,
    Cancelled,
}

impl ExecutionState {
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            ExecutionState::Submitted | ExecutionState::Polling { .. }
        )
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::Submitted => f.write_str("submitted"),
            ExecutionState::Polling { attempt } => write!(f, "polling ({})", attempt),
            ExecutionState::Executed => f.write_str("executed"),
            ExecutionState::TimedOut => f.write_str("timed out"),
            ExecutionState::CommunicationError => f.write_str("communication error"),
            ExecutionState::Cancelled => f.write_str("cancelled"),
        }
    }
}
