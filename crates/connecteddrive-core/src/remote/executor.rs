//! Submission and polling of a single remote service.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::status::ExitStatus;

use super::poll::{PollOutcome, PollSchedule};
use super::{ExecutionState, RemoteService, RemoteServiceApi};

/// Terminal result of a remote service execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The vehicle reported `EXECUTED`
    Executed,
    /// Accepted, but never confirmed within the poll schedule
    TimedOut,
    /// Submission or a status poll failed
    CommunicationError,
    /// The caller cancelled while waiting for the next poll
    Cancelled,
}

impl ExecutionOutcome {
    pub fn exit_status(self) -> ExitStatus {
        match self {
            ExecutionOutcome::Executed => ExitStatus::Success,
            ExecutionOutcome::TimedOut => ExitStatus::TimerExpired,
            ExecutionOutcome::CommunicationError => ExitStatus::CommunicationError,
            ExecutionOutcome::Cancelled => ExitStatus::Cancelled,
        }
    }

    pub fn state(self) -> ExecutionState {
        match self {
            ExecutionOutcome::Executed => ExecutionState::Executed,
            ExecutionOutcome::TimedOut => ExecutionState::TimedOut,
            ExecutionOutcome::CommunicationError => ExecutionState::CommunicationError,
            ExecutionOutcome::Cancelled => ExecutionState::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionReport {
    pub outcome: ExecutionOutcome,
    /// Number of execution state requests made
    pub polls: u32,
}

/// Runs one remote service at a time against one vehicle.
pub struct CommandExecutor<A> {
    api: A,
    schedule: PollSchedule,
}

impl<A: RemoteServiceApi> CommandExecutor<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            schedule: PollSchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: PollSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Submit `service` and poll until it is executed or the schedule runs out.
    pub async fn execute(&self, service: RemoteService) -> ExecutionReport {
        self.execute_until_cancelled(service, &CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), but stops waiting once `cancel` fires.
    ///
    /// Cancellation is only observed between polls; a request in flight
    /// always completes.
    pub async fn execute_until_cancelled(
        &self,
        service: RemoteService,
        cancel: &CancellationToken,
    ) -> ExecutionReport {
        info!(service = %service, code = service.code(), "Executing remote service");

        if let Err(e) = self.api.submit(service).await {
            warn!(service = %service, error = %e, "Remote service submission failed");
            return Self::finish(service, ExecutionOutcome::CommunicationError, 0);
        }
        debug!(service = %service, state = %ExecutionState::Submitted, "Remote service accepted");

        let api = &self.api;
        let mut polls = 0;
        let result = self
            .schedule
            .run(cancel, |attempt| {
                polls = attempt;
                async move {
                    let state = ExecutionState::Polling { attempt };
                    debug!(state = %state, "Requesting execution state");
                    let status = api.execution_state().await?;
                    debug!(attempt, status = %status, "Execution state");
                    Ok::<_, ApiError>(status.is_executed().then_some(()))
                }
            })
            .await;

        let outcome = match result {
            Ok(PollOutcome::Ready { .. }) => ExecutionOutcome::Executed,
            Ok(PollOutcome::Exhausted { .. }) => ExecutionOutcome::TimedOut,
            Ok(PollOutcome::Cancelled { .. }) => ExecutionOutcome::Cancelled,
            Err(e) => {
                warn!(service = %service, attempt = polls, error = %e, "Execution state request failed");
                ExecutionOutcome::CommunicationError
            }
        };

        Self::finish(service, outcome, polls)
    }

    fn finish(service: RemoteService, outcome: ExecutionOutcome, polls: u32) -> ExecutionReport {
        match outcome {
            ExecutionOutcome::Executed => {
                info!(service = %service, polls, "Remote service executed")
            }
            other => {
                warn!(service = %service, polls, state = %other.state(), "Remote service not confirmed")
            }
        }
        ExecutionReport { outcome, polls }
    }
}
