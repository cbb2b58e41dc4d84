//! Client for the remote coefficient prediction service.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ServiceError;

use super::models::{PredictionInput, PredictionRequest, PredictionResult};

const SERVICE: &str = "prediction service";

/// Produces thrust, power and efficiency coefficients for a propeller.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Single attempt; any failure is final for this request.
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, ServiceError>;
}

/// Prediction service reached over HTTP (`POST {base}/predict`).
pub struct HttpPredictionService {
    client: Client,
    base_url: String,
}

impl HttpPredictionService {
    /// The client is expected to carry the request timeout.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, ServiceError> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictionRequest::from(input);
        tracing::debug!(%url, blades = body.blades, diameter = body.diameter, pitch = body.pitch, "requesting prediction");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                service: SERVICE,
                status,
                body,
            });
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(|e| ServiceError::decode(SERVICE, e))
    }
}
