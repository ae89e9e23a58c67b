//! Remote services: submit a command to the vehicle and wait until the
//! vehicle reports it executed.
//!
//! Remote services are asynchronous. After submission the execution state
//! is polled on a fixed schedule (`poll::PollSchedule`, 9 polls 10s apart).

pub mod executor;
pub mod poll;
pub mod service;
pub mod state;

use async_trait::async_trait;

use crate::api::{ApiError, VehicleClient};

pub use executor::{CommandExecutor, ExecutionOutcome, ExecutionReport};
pub use poll::PollSchedule;
pub use service::{RemoteService, UnknownService};
pub use state::{ExecutionState, RemoteServiceStatus};

/// The two vehicle API calls a remote service execution needs.
#[async_trait]
pub trait RemoteServiceApi: Send + Sync {
    async fn submit(&self, service: RemoteService) -> Result<(), ApiError>;

    async fn execution_state(&self) -> Result<RemoteServiceStatus, ApiError>;
}

#[async_trait]
impl RemoteServiceApi for VehicleClient {
    async fn submit(&self, service: RemoteService) -> Result<(), ApiError> {
        self.submit_remote_service(service).await
    }

    async fn execution_state(&self) -> Result<RemoteServiceStatus, ApiError> {
        VehicleClient::execution_state(self).await
    }
}
