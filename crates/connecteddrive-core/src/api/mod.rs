//! REST API client module for the ConnectedDrive vehicle API.
//!
//! This module provides the `VehicleClient` for submitting remote services,
//! reading their execution state, querying vehicle status and sending
//! messages to the car.
//!
//! All requests carry the bearer token obtained by `auth::CredentialManager`.

pub mod client;
pub mod error;

pub use client::VehicleClient;
pub use error::ApiError;
