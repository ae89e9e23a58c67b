//! API client for the ConnectedDrive vehicle API.
//!
//! One client serves one vehicle: the VIN and the bearer token are fixed
//! at construction.

use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Credential;
use crate::config::Config;
use crate::models::{DynamicResponse, EfficiencyResponse, MessagePayload, NavigationResponse};
use crate::remote::state::{parse_execution_state, RemoteServiceStatus};
use crate::remote::RemoteService;

use super::ApiError;

/// Look back this many minutes when reading dynamic vehicle data
const DYNAMIC_OFFSET_MINUTES: i32 = -60;

/// API client for one vehicle.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct VehicleClient {
    client: Client,
    base_url: String,
    vin: String,
    token: String,
}

impl VehicleClient {
    /// Create a client for the credential's vehicle.
    ///
    /// Fails with `Unauthorized` when the credential carries no access token.
    pub fn new(config: &Config, credential: &Credential) -> Result<Self, ApiError> {
        let token = credential
            .access_token()
            .ok_or(ApiError::Unauthorized)?
            .to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.vehicle_api_url.trim_end_matches('/').to_string(),
            vin: credential.vin.clone(),
            token,
        })
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    fn remote_services_url(&self, suffix: &str) -> String {
        format!("{}/remoteservices/v1/{}/{}", self.base_url, self.vin, suffix)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = url, "GET");
        let response = self.client.get(url).bearer_auth(&self.token).send().await?;
        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", url, e)))
    }

    /// Ask the vehicle to execute a remote service
    pub async fn submit_remote_service(&self, service: RemoteService) -> Result<(), ApiError> {
        let url = self.remote_services_url(service.code());
        debug!(url = %url, service = %service, "Submitting remote service");

        let response = self.client.post(&url).bearer_auth(&self.token).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Read the execution state of the last submitted remote service
    pub async fn execution_state(&self) -> Result<RemoteServiceStatus, ApiError> {
        let url = self.remote_services_url("state/execution");

        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;
        let body = Self::check_response(response).await?.text().await?;
        parse_execution_state(&body)
    }

    pub async fn fetch_dynamic(&self) -> Result<DynamicResponse, ApiError> {
        let url = format!(
            "{}/dynamic/v1/{}?offset={}",
            self.base_url, self.vin, DYNAMIC_OFFSET_MINUTES
        );
        self.get(&url).await
    }

    pub async fn fetch_navigation(&self) -> Result<NavigationResponse, ApiError> {
        let url = format!("{}/navigation/v1/{}", self.base_url, self.vin);
        self.get(&url).await
    }

    pub async fn fetch_efficiency(&self) -> Result<EfficiencyResponse, ApiError> {
        let url = format!("{}/efficiency/v1/{}", self.base_url, self.vin);
        self.get(&url).await
    }

    /// Send a message to the vehicle's inbox
    pub async fn send_message(&self, subject: &str, message: &str) -> Result<(), ApiError> {
        let url = format!("{}/myinfo/v1", self.base_url);
        let payload = MessagePayload {
            vins: [self.vin.as_str()],
            message,
            subject,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }
}
