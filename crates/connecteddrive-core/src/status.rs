//! Process exit statuses.
//!
//! Codes follow the errno values the vehicle scripts have always reported,
//! so openHAB rules that inspect the exit code keep working.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Generic failure (configuration or item store unreachable)
    Failure,
    /// EACCES: login was rejected
    PermissionDenied,
    /// ETIME: remote service accepted but never confirmed
    TimerExpired,
    /// ECOMM: any HTTP failure against the vehicle API
    CommunicationError,
    /// EPROTO: the auth provider answered with an unexpected redirect
    ProtocolError,
    /// ECANCELED: polling was cancelled by the caller
    Cancelled,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::PermissionDenied => 13,
            ExitStatus::TimerExpired => 62,
            ExitStatus::CommunicationError => 70,
            ExitStatus::ProtocolError => 71,
            ExitStatus::Cancelled => 125,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitStatus::Success => "success",
            ExitStatus::Failure => "failure",
            ExitStatus::PermissionDenied => "permission denied",
            ExitStatus::TimerExpired => "timer expired",
            ExitStatus::CommunicationError => "communication error",
            ExitStatus::ProtocolError => "protocol error",
            ExitStatus::Cancelled => "cancelled",
        };
        write!(f, "{} ({})", name, self.code())
    }
}
