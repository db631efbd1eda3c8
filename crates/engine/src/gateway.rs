//! REST client for the CrossCart backend.
//!
//! Carries the quotation submissions, the offline preview call, refund
//! decisions, and grouping persistence. Every call is fire-and-report:
//! there is no retry logic here — a failure is terminal for the attempt
//! and requires explicit user action upstream.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use crosscart_core::{EcommercePlatform, RefundId, RequestItemId, SubRequestId};

use crate::config::EngineConfig;
use crate::quotation::payload::{OfflineQuotation, OfflineQuotationBody, OnlineQuotation, QuotationPreview};

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or build the client.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// The backend-provided message, when one was present in the error
    /// body. Used to fill user-facing failure notifications.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Error body shape the backend uses for rejections.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// REST client for the CrossCart backend API.
#[derive(Clone)]
pub struct CrossCartClient {
    client: reqwest::Client,
    base_url: String,
}

impl CrossCartClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the token is not
    /// a valid header value.
    pub fn new(config: &EngineConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| GatewayError::Parse(format!("Invalid API token format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Submit an online quotation.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self, payload), fields(sub_request_id = %payload.body.sub_request_id))]
    pub async fn submit_online(&self, payload: &OnlineQuotation) -> Result<(), GatewayError> {
        let url = format!("{}/quotations/online", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Submit an offline quotation.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self, payload), fields(sub_request_id = %payload.body.sub_request_id))]
    pub async fn submit_offline(&self, payload: &OfflineQuotation) -> Result<(), GatewayError> {
        let url = format!("{}/quotations/offline", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Compute the tax/shipping breakdown for an offline quotation.
    ///
    /// Side-effect-free on the backend; callable repeatedly while the
    /// staff member tweaks the form.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self, body), fields(sub_request_id = %body.sub_request_id))]
    pub async fn calculate_quotation(
        &self,
        body: &OfflineQuotationBody,
    ) -> Result<QuotationPreview, GatewayError> {
        let url = format!("{}/quotations/calculate", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }

    /// Approve a refund at the given 0–1 rate.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn approve_refund(
        &self,
        refund_id: RefundId,
        refund_rate: f64,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/refunds/{refund_id}/approve", self.base_url);
        let body = json!({ "refundRate": refund_rate });
        let response = self.client.post(&url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Reject a refund with a reason.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self, reason))]
    pub async fn reject_refund(
        &self,
        refund_id: RefundId,
        reason: &str,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/refunds/{refund_id}/reject", self.base_url);
        let body = json!({ "reason": reason });
        let response = self.client.post(&url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Persist a sub-request's seller/platform edit.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self, seller, platform))]
    pub async fn update_sub_request(
        &self,
        sub_request_id: SubRequestId,
        seller: &str,
        platform: &EcommercePlatform,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/sub-requests/{sub_request_id}", self.base_url);
        let body = json!({
            "seller": seller,
            "ecommercePlatform": platform.name(),
        });
        let response = self.client.put(&url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Persist moving an item into a sub-request.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        sub_request_id: SubRequestId,
        item_id: RequestItemId,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/sub-requests/{sub_request_id}/items", self.base_url);
        let body = json!({ "requestItemId": item_id });
        let response = self.client.post(&url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Persist moving an item out of a sub-request.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        sub_request_id: SubRequestId,
        item_id: RequestItemId,
    ) -> Result<(), GatewayError> {
        let url = format!(
            "{}/sub-requests/{sub_request_id}/items/{item_id}",
            self.base_url
        );
        let response = self.client.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Turn a non-success response into a [`GatewayError::Api`], pulling
    /// the backend's message out of the JSON error body when present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map_or(text, |body| body.message);
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_only_from_api_errors() {
        let err = GatewayError::Api {
            status: 422,
            message: "Quotation already exists".to_string(),
        };
        assert_eq!(err.backend_message(), Some("Quotation already exists"));

        let err = GatewayError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.backend_message(), None);

        let err = GatewayError::Parse("bad json".to_string());
        assert_eq!(err.backend_message(), None);
    }
}
