//! Core library for connecteddrive.
//!
//! This crate provides:
//! - `auth`: bearer token acquisition and expiry tracking (`CredentialManager`)
//! - `remote`: remote service submission and execution polling (`CommandExecutor`)
//! - `api`: the ConnectedDrive vehicle API client
//! - `store`: the openHAB item store used for credentials and published values
//! - `telemetry`: vehicle status queries published to the store
//!
//! Everything runs sequentially; the only automatic retry is the remote
//! service status poll.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod remote;
pub mod status;
pub mod store;
pub mod telemetry;

pub use api::{ApiError, VehicleClient};
pub use auth::{AuthError, Credential, CredentialManager};
pub use config::Config;
pub use remote::{CommandExecutor, ExecutionOutcome, RemoteService};
pub use status::ExitStatus;
pub use store::{ItemStore, OpenHabStore, StoreError};
