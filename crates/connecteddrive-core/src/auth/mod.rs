//! Authentication module for obtaining and renewing the bearer token.
//!
//! This module provides:
//! - `Credential`: account data plus the cached token and its absolute expiry
//! - `CredentialManager`: reuses a valid token or logs in for a new one
//! - `redirect`: interpretation of the login redirect
//!
//! The token and its expiry are persisted to the item store right after a
//! successful login.

pub mod clock;
pub mod credential;
pub mod manager;
pub mod redirect;

use thiserror::Error;

use crate::status::ExitStatus;

pub use clock::{Clock, SystemClock};
pub use credential::Credential;
pub use manager::CredentialManager;
pub use redirect::{Grant, LoginResult};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login rejected - user or password wrong?")]
    Denied,

    #[error("Unexpected login redirect: {0}")]
    MalformedRedirect(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl AuthError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            AuthError::Denied => ExitStatus::PermissionDenied,
            AuthError::MalformedRedirect(_) => ExitStatus::ProtocolError,
            AuthError::NetworkError(_) => ExitStatus::CommunicationError,
        }
    }
}
