//! Token lifecycle: reuse while valid, log in when expired.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, redirect, Client};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::store::{self, items, ItemStore};

use super::redirect::{parse_redirect, LoginResult};
use super::{AuthError, Clock, Credential, SystemClock};

// Fixed OAuth client configuration of the ConnectedDrive web portal
const CLIENT_ID: &str = "dbf0a542-ebd1-4ff0-a9a7-55172fbfce35";
const REDIRECT_URI: &str =
    "https://www.bmw-connecteddrive.com/app/default/static/external-dispatch.html";
const RESPONSE_TYPE: &str = "token";
const SCOPE: &str = "authenticate_user fupo";
const STATE: &str =
    "eyJtYXJrZXQiOiJkZSIsImxhbmd1YWdlIjoiZGUiLCJkZXN0aW5hdGlvbiI6ImxhbmRpbmdQYWdlIn0";
const LOCALE: &str = "DE-de";

pub struct CredentialManager {
    client: Client,
    auth_url: String,
    store: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
}

impl CredentialManager {
    pub fn new(config: &Config, store: Arc<dyn ItemStore>) -> Result<Self, AuthError> {
        // The redirect itself is the answer, so it must not be followed
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            auth_url: config.auth_url.clone(),
            store,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return a credential with a usable token.
    ///
    /// A cached token that has not expired is returned as is, without any
    /// network call or store write. Otherwise a single login is performed.
    pub async fn resolve_token(&self, credential: Credential) -> Result<Credential, AuthError> {
        let now = self.clock.now();
        if credential.is_valid_at(now) {
            debug!(
                expires_in = credential.seconds_until_expiry(now),
                "Reusing cached access token"
            );
            return Ok(credential);
        }

        info!("Access token expired or unset, logging in");
        self.login(credential).await
    }

    /// Log in with the credential's username and password.
    ///
    /// On success the new token and its absolute expiry are written to the
    /// store (token first) and returned in the credential. Nothing is
    /// written when the login is denied or the redirect is malformed.
    pub async fn login(&self, credential: Credential) -> Result<Credential, AuthError> {
        let form = [
            ("username", credential.username.as_str()),
            ("password", credential.password.as_str()),
            ("client_id", CLIENT_ID),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", RESPONSE_TYPE),
            ("scope", SCOPE),
            ("state", STATE),
            ("locale", LOCALE),
        ];

        let response = self.client.post(&self.auth_url).form(&form).send().await?;

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AuthError::MalformedRedirect(format!("no Location header (status {})", status))
            })?;

        match parse_redirect(location)? {
            LoginResult::Denied => {
                warn!(username = %credential.username, "Login denied");
                Err(AuthError::Denied)
            }
            LoginResult::Granted(grant) => {
                let lifetime = i64::try_from(grant.expires_in).unwrap_or(i64::MAX);
                let expires_at = self.clock.now().saturating_add(lifetime);
                info!(
                    token_type = %grant.token_type,
                    expires_in = grant.expires_in,
                    "Obtained new access token"
                );

                store::publish(self.store.as_ref(), items::ACCESS_TOKEN, &grant.access_token).await;
                store::publish(self.store.as_ref(), items::TOKEN_EXPIRES, &expires_at).await;

                Ok(credential.with_token(&grant.access_token, expires_at))
            }
        }
    }
}
