//! Implements RegistrationApi against the college backend's REST endpoints.
//!
//! Transport failures map to `Network`; non-success responses map to
//! `ServerRejected` with the backend's `detail` message when one is present.
//! Requests carry a timeout so a hanging backend cannot leave the submit
//! control stuck forever.

use crate::domain::{DomainError, RegistrationReceipt, SubmissionRequest};
use crate::ports::RegistrationApi;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

pub struct HttpRegistrationApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CheckResponse {
    exists: bool,
}

#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    success: bool,
    register_number: Option<String>,
    detail: Option<String>,
}

impl HttpRegistrationApi {
    /// # Arguments
    /// * `base_url` - e.g. "http://localhost:8000"; a trailing slash is trimmed
    /// * `timeout` - applied to every request
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn media_part(media: &crate::domain::CapturedMedia) -> Result<Part, DomainError> {
        Part::bytes(media.bytes.clone())
            .file_name(media.source_name.clone())
            .mime_str(media.kind.mime())
            .map_err(|e| DomainError::Network(e.to_string()))
    }
}

#[async_trait::async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn check_register_number(&self, full_id: &str) -> Result<bool, DomainError> {
        let url = format!("{}/api/check-register-number/{}", self.base_url, full_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DomainError::Network(format!(
                "availability check returned {}",
                response.status()
            )));
        }
        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;
        Ok(body.exists)
    }

    async fn register(
        &self,
        req: &SubmissionRequest,
    ) -> Result<RegistrationReceipt, DomainError> {
        let mut form = Form::new()
            .text("name", req.name.clone())
            .text("year", req.year.as_number().to_string())
            .text("section", req.section.to_string())
            .text("last_digits", req.last_digits.clone())
            .part("photo", Self::media_part(&req.photo)?)
            .part("signature", Self::media_part(&req.signature)?);

        // The MAC field exists on the wire only for iPad owners.
        form = match &req.ipad_mac_address {
            Some(mac) => form
                .text("has_ipad", "Yes")
                .text("ipad_mac_address", mac.clone()),
            None => form.text("has_ipad", "No"),
        };

        let url = format!("{}/api/register", self.base_url);
        info!(url = %url, "submitting registration");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;

        let status = response.status();
        let body: RegisterResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Network(format!("malformed response: {}", e)))?;

        if status.is_success() && body.success {
            let register_number = body
                .register_number
                .ok_or_else(|| DomainError::Network("response missing register_number".into()))?;
            return Ok(RegistrationReceipt { register_number });
        }

        let detail = body
            .detail
            .unwrap_or_else(|| format!("registration failed ({})", status));
        warn!(status = %status, detail = %detail, "registration rejected");
        Err(DomainError::ServerRejected(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api =
            HttpRegistrationApi::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url, "http://localhost:8000");
    }

    #[test]
    fn register_response_parses_success_and_detail() {
        let ok: RegisterResponse =
            serde_json::from_str(r#"{"success": true, "register_number": "RA2411026050042"}"#)
                .unwrap();
        assert!(ok.success);
        assert_eq!(ok.register_number.as_deref(), Some("RA2411026050042"));

        // FastAPI error shape: only a detail field.
        let err: RegisterResponse =
            serde_json::from_str(r#"{"detail": "Registration number already exists"}"#).unwrap();
        assert!(!err.success);
        assert_eq!(
            err.detail.as_deref(),
            Some("Registration number already exists")
        );
    }
}
