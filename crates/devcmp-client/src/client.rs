//! HTTP client for the device console API

use crate::error::FetchError;
use devcmp_config::ConsoleConfig;
use devcmp_core::{json_kind, Device, NamedObject, ObjectCategory, ObjectList};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Read-only client for device and object lists
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ConsoleClient {
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.base_url,
            config.token.as_deref(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All devices known to the console
    pub async fn list_devices(&self) -> Result<Vec<Device>, FetchError> {
        let url = format!("{}/api/device", self.base_url);
        let body = self.get_json(&url, &[("action", "list")]).await?;
        serde_json::from_value(body).map_err(|source| FetchError::Decode { url, source })
    }

    /// Devices of `vendor`, the only ones whose objects can be compared
    pub async fn comparable_devices(&self, vendor: &str) -> Result<Vec<Device>, FetchError> {
        let devices = self.list_devices().await?;
        let total = devices.len();
        let matching: Vec<Device> = devices.into_iter().filter(|d| d.is_vendor(vendor)).collect();
        debug!(total, matching = matching.len(), vendor, "Filtered device list");
        Ok(matching)
    }

    /// Objects of one category configured on one device
    pub async fn fetch_objects(
        &self,
        device_id: &str,
        category: ObjectCategory,
    ) -> Result<ObjectList, FetchError> {
        let url = format!("{}{}", self.base_url, category.api_path());
        let (key, value) = category.query_param();
        let body = self.get_json(&url, &[(key, value), ("id", device_id)]).await?;

        let items = match body {
            Value::Array(items) => items,
            other => {
                return Err(FetchError::UnexpectedBody {
                    url,
                    reason: format!("expected a JSON array, got {}", json_kind(&other)),
                })
            }
        };

        let objects = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                NamedObject::try_from(item).map_err(|err| FetchError::UnexpectedBody {
                    url: url.clone(),
                    reason: format!("entry {}: {}", index, err),
                })
            })
            .collect::<Result<ObjectList, _>>()?;

        debug!(
            device_id,
            category = category.as_str(),
            count = objects.len(),
            "Fetched objects"
        );
        Ok(objects)
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, FetchError> {
        let mut request = self.client.get(url).query(query);

        if let Some(ref token) = self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let raw_body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        serde_json::from_str(&raw_body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
