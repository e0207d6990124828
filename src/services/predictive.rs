use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::CampaignRequest;

/// Errors from the predictive scoring collaborator. Callers treat all of
/// these as soft: a failed prediction falls back to 0 ROI / 50 insight and
/// never aborts a ranking call.
#[derive(Debug, Error)]
pub enum PredictiveError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("predictive service disabled")]
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Opaque model output, already normalized to 0-100-ish values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiPrediction {
    pub roi: f64,
    pub confidence: f64,
    pub risk: RiskLevel,
}

#[async_trait]
pub trait PredictiveService: Send + Sync {
    async fn predict_roi(
        &self,
        creator_id: &str,
        request: &CampaignRequest,
    ) -> Result<RoiPrediction, PredictiveError>;
}

/// HTTP client for the external ROI prediction service.
pub struct HttpPredictiveService {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    #[serde(rename = "creatorId")]
    creator_id: &'a str,
    request: &'a CampaignRequest,
}

impl HttpPredictiveService {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }
}

#[async_trait]
impl PredictiveService for HttpPredictiveService {
    async fn predict_roi(
        &self,
        creator_id: &str,
        request: &CampaignRequest,
    ) -> Result<RoiPrediction, PredictiveError> {
        let url = format!("{}/predict/roi", self.base_url.trim_end_matches('/'));

        tracing::debug!("Requesting ROI prediction for creator {}", creator_id);

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&PredictRequest { creator_id, request })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PredictiveError::ApiError(format!(
                "prediction failed: {}",
                response.status()
            )));
        }

        response
            .json::<RoiPrediction>()
            .await
            .map_err(|e| PredictiveError::InvalidResponse(e.to_string()))
    }
}

/// Stand-in used when no predictive endpoint is configured. Always errs so
/// the scorer's documented fallback (roi 0, insight 50) applies uniformly.
pub struct NoopPredictive;

#[async_trait]
impl PredictiveService for NoopPredictive {
    async fn predict_roi(
        &self,
        _creator_id: &str,
        _request: &CampaignRequest,
    ) -> Result<RoiPrediction, PredictiveError> {
        Err(PredictiveError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationType;

    fn request() -> CampaignRequest {
        CampaignRequest {
            seller_id: None,
            budget_range: None,
            target_category: "Fashion".to_string(),
            promotion_type: None,
            location: None,
            location_type: LocationType::Remote,
            min_followers: None,
            max_followers: None,
        }
    }

    #[tokio::test]
    async fn test_noop_always_errs() {
        let svc = NoopPredictive;
        assert!(svc.predict_roi("c1", &request()).await.is_err());
    }

    #[tokio::test]
    async fn test_http_client_parses_prediction() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/predict/roi")
            .match_header("x-api-key", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"roi": 72.0, "confidence": 64.0, "risk": "low"}"#)
            .create_async()
            .await;

        let svc = HttpPredictiveService::new(server.url(), "test_key".to_string(), 5);
        let prediction = svc.predict_roi("c1", &request()).await.unwrap();

        assert_eq!(prediction.roi, 72.0);
        assert_eq!(prediction.confidence, 64.0);
        assert_eq!(prediction.risk, RiskLevel::Low);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_client_maps_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/predict/roi")
            .with_status(500)
            .create_async()
            .await;

        let svc = HttpPredictiveService::new(server.url(), "test_key".to_string(), 5);
        let result = svc.predict_roi("c1", &request()).await;
        assert!(matches!(result, Err(PredictiveError::ApiError(_))));
    }
}
