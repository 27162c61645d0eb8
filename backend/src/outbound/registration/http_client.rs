//! Reqwest-backed registration client.
//!
//! This adapter owns transport details only: JSON request encoding, the
//! request timeout, trace propagation and HTTP error mapping. Response
//! bodies are passed back untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use synthetic_data::SyntheticIdentity;

use crate::domain::ports::{RegistrationError, RegistrationReceipt, UserRegistrationClient};
use crate::domain::{TRACE_ID_HEADER, TraceId};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Registration client that POSTs each identity to one endpoint.
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    endpoint: Url,
}

impl HttpRegistrationClient {
    /// Build a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Target URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserRegistrationClient for HttpRegistrationClient {
    async fn register(
        &self,
        identity: &SyntheticIdentity,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(identity);
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(RegistrationReceipt {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body.as_ref()).into_owned(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> RegistrationError {
    if error.is_timeout() {
        RegistrationError::timeout(error.to_string())
    } else {
        RegistrationError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RegistrationError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RegistrationError::timeout(message)
        }
        _ => RegistrationError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
