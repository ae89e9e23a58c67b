use std::fmt;

use crate::store::{items, ItemStore, StoreError};

/// Account data plus the current session token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub vin: String,
    access_token: Option<String>,
    token_expires_at: Option<i64>,
}

impl Credential {
    /// A credential without a session token. The VIN is upper-cased.
    pub fn new(username: &str, password: &str, vin: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            vin: vin.trim().to_uppercase(),
            access_token: None,
            token_expires_at: None,
        }
    }

    pub fn with_token(mut self, access_token: &str, expires_at: i64) -> Self {
        self.access_token = Some(access_token.to_string());
        self.token_expires_at = Some(expires_at);
        self
    }

    /// Load account data (item labels) and the session (item states).
    pub async fn load(store: &dyn ItemStore) -> Result<Self, StoreError> {
        let username = store.label(items::USERNAME).await?;
        let password = store.label(items::PASSWORD).await?;
        let vin = store.label(items::VIN).await?;

        let mut credential = Self::new(&username, &password, &vin);
        credential.access_token = store
            .state(items::ACCESS_TOKEN)
            .await?
            .and_then(|state| parse_token(&state));
        credential.token_expires_at = store
            .state(items::TOKEN_EXPIRES)
            .await?
            .and_then(|state| parse_expiry(&state));

        Ok(credential)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Absolute expiry in Unix seconds, `None` when unset
    pub fn token_expires_at(&self) -> Option<i64> {
        self.token_expires_at
    }

    /// A token is usable strictly before its expiry. An unset expiry is
    /// always expired.
    pub fn is_valid_at(&self, now: i64) -> bool {
        match (&self.access_token, self.token_expires_at) {
            (Some(_), Some(expires_at)) => now < expires_at,
            _ => false,
        }
    }

    /// Seconds left before expiry, zero when expired or unset
    pub fn seconds_until_expiry(&self, now: i64) -> i64 {
        self.token_expires_at
            .map(|expires_at| (expires_at - now).max(0))
            .unwrap_or(0)
    }
}

// Keep secrets out of logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .field("vin", &self.vin)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("token_expires_at", &self.token_expires_at)
            .finish()
    }
}

/// openHAB reports `NULL` or `UNDEF` for items that were never set.
fn is_unset(state: &str) -> bool {
    matches!(state.trim(), "" | "NULL" | "UNDEF")
}

fn parse_token(state: &str) -> Option<String> {
    if is_unset(state) {
        None
    } else {
        Some(state.trim().to_string())
    }
}

fn parse_expiry(state: &str) -> Option<i64> {
    if is_unset(state) {
        return None;
    }
    state.trim().parse().ok()
}
