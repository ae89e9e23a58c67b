//! openHAB REST item store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::debug;

use super::{Item, ItemStore, StoreError};

/// HTTP request timeout in seconds. openHAB runs on the local network.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Item store backed by `GET /rest/items/{key}` and `PUT /rest/items/{key}/state`.
#[derive(Clone)]
pub struct OpenHabStore {
    client: Client,
    base_url: String,
}

impl OpenHabStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn item_url(&self, key: &str) -> String {
        format!("{}/rest/items/{}", self.base_url, key)
    }
}

#[async_trait]
impl ItemStore for OpenHabStore {
    async fn item(&self, key: &str) -> Result<Item, StoreError> {
        let response = self
            .client
            .get(self.item_url(key))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    async fn put_state(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(item = key, "Updating item state");

        let response = self
            .client
            .put(format!("{}/state", self.item_url(key)))
            .header(header::CONTENT_TYPE, "text/plain")
            .body(value.to_string())
            .send()
            .await?;

        // openHAB answers 202 Accepted for state updates
        match response.status() {
            StatusCode::ACCEPTED => Ok(()),
            status => Err(StoreError::Rejected {
                key: key.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_item_reads_label_and_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/items/Bmw_tokenExpires"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "link": "http://localhost:8080/rest/items/Bmw_tokenExpires",
                "state": "1700000000",
                "type": "String",
                "name": "Bmw_tokenExpires",
                "label": "Token expiry"
            })))
            .mount(&server)
            .await;

        let store = OpenHabStore::new(&server.uri()).unwrap();
        let item = store.item("Bmw_tokenExpires").await.unwrap();
        assert_eq!(item.state.as_deref(), Some("1700000000"));
        assert_eq!(item.label.as_deref(), Some("Token expiry"));
    }

    #[tokio::test]
    async fn test_put_state_sends_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/rest/items/Bmw_mileage/state"))
            .and(body_string("12345"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let store = OpenHabStore::new(&server.uri()).unwrap();
        store.put_state("Bmw_mileage", "12345").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_state_requires_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = OpenHabStore::new(&server.uri()).unwrap();
        let err = store.put_state("Bmw_unknown", "1").await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 404, .. }));
    }
}
