//! GoHighLevel contact client
//!
//! One authenticated JSON POST per submission against the contact-creation
//! endpoint. Empty fields are omitted from the payload rather than sent as
//! empty strings; custom fields with no value are filtered the same way.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use domain_intake::{ContactSync, NormalizedSubmission, SyncError};

/// Protocol version marker required by the contact API
pub const GHL_API_VERSION: &str = "2021-07-28";

/// Default contact API endpoint
const DEFAULT_API_BASE: &str = "https://services.leadconnectorhq.com";

/// Default request timeout; expiry classifies as a transport failure
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Upper bound on the response-body snapshot carried in an API error
const BODY_SNAPSHOT_MAX_LEN: usize = 500;

// Custom field ids in the upstream location schema.
const FIELD_BUSINESS_NAME: &str = "t5zu8K2eLte2H0pIJPwe";
const FIELD_GOAL: &str = "47n5yCoTNXaSJkmJUOIp";
const FIELD_TEXT_CONSENT: &str = "Kk3EP7hOQ9KEYOVWDz2P";

/// Tags applied to every created contact
const CONTACT_TAGS: &[&str] = &["intake:voice-agent", "source:squidworks-site"];

/// Fixed source tag on created contacts
const CONTACT_SOURCE: &str = "squidworks.ai:intake";

/// Configuration for the GoHighLevel client
#[derive(Debug, Clone)]
pub struct GhlConfig {
    /// Bearer credential for the contact API
    pub api_key: String,
    /// Location the created contacts belong to
    pub location_id: String,
    /// API base URL; overridable for tests
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
}

impl GhlConfig {
    /// Creates a configuration with the production endpoint and default
    /// timeout
    pub fn new(api_key: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            location_id: location_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the GoHighLevel contact-creation API
#[derive(Debug, Clone)]
pub struct GhlClient {
    client: Client,
    api_base: String,
    api_key: String,
    location_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactUpsertRequest<'a> {
    location_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<&'a str>,
    custom_fields: Vec<CustomField<'a>>,
    tags: Vec<&'a str>,
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct CustomField<'a> {
    id: &'a str,
    value: &'a str,
}

impl GhlClient {
    /// Creates a client from the given configuration
    pub fn new(config: GhlConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("http client");
        Self {
            client,
            api_base: config.api_base,
            api_key: config.api_key,
            location_id: config.location_id,
        }
    }

    fn build_request<'a>(&'a self, contact: &'a NormalizedSubmission) -> ContactUpsertRequest<'a> {
        let custom_fields = [
            (FIELD_BUSINESS_NAME, contact.business_name.as_str()),
            (FIELD_GOAL, contact.goal.as_str()),
            // Consent to receive texts is implied by submitting the form.
            (FIELD_TEXT_CONSENT, "Yes"),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(id, value)| CustomField { id, value })
        .collect();

        ContactUpsertRequest {
            location_id: &self.location_id,
            first_name: non_empty(&contact.first_name),
            last_name: non_empty(&contact.last_name),
            email: non_empty(&contact.email),
            phone: non_empty(&contact.phone),
            company_name: non_empty(&contact.business_name),
            custom_fields,
            tags: CONTACT_TAGS.to_vec(),
            source: CONTACT_SOURCE,
        }
    }
}

#[async_trait]
impl ContactSync for GhlClient {
    /// Creates a contact and returns its external identifier
    ///
    /// # Errors
    ///
    /// - [`SyncError::Transport`] when the request cannot be sent or times
    ///   out
    /// - [`SyncError::Api`] on any non-success status, carrying the status
    ///   code and a truncated body snapshot
    /// - [`SyncError::MissingContactId`] when a success response matches
    ///   neither known shape
    #[instrument(level = "info", skip(self, contact), fields(email = %contact.email))]
    async fn upsert_contact(&self, contact: &NormalizedSubmission) -> Result<String, SyncError> {
        let url = format!("{}/contacts/", self.api_base);
        let body = self.build_request(contact);

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .header("Version", GHL_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(SyncError::Api {
                status: status.as_u16(),
                body: snapshot(&text),
            });
        }

        // Malformed success bodies degrade to the missing-id error rather
        // than a parse failure.
        let data: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        extract_contact_id(&data).ok_or(SyncError::MissingContactId)
    }
}

/// Pulls the contact identifier out of a success response
///
/// The API answers with one of two shapes; which is authoritative is
/// undocumented, so both are checked: `{"contact": {"id": ...}}` first,
/// then a top-level `{"id": ...}`.
fn extract_contact_id(data: &Value) -> Option<String> {
    data.get("contact")
        .and_then(|c| c.get("id"))
        .or_else(|| data.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn snapshot(body: &str) -> String {
    body.chars().take(BODY_SNAPSHOT_MAX_LEN).collect()
}
