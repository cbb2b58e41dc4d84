//! Client for the remote dataset service.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ServiceError;

use super::models::{Dataset, DatasetKind};

const SERVICE: &str = "dataset service";

/// Anything that can produce a full dataset of a given kind.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch every row of `kind`; single attempt.
    async fn fetch(&self, kind: DatasetKind) -> Result<Dataset, ServiceError>;
}

/// Dataset service reached over HTTP (`GET {base}/api/{kind}`).
pub struct HttpDatasetSource {
    client: Client,
    base_url: String,
}

impl HttpDatasetSource {
    /// The client is expected to carry the request timeout.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self, kind: DatasetKind) -> Result<Dataset, ServiceError> {
        let url = format!("{}/api/{}", self.base_url, kind.as_str());
        tracing::debug!(%url, "fetching dataset");

        let response = self
            .client
            .get(&url)
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

        let dataset = match kind {
            DatasetKind::Experiment => Dataset::Experiment(
                response
                    .json()
                    .await
                    .map_err(|e| ServiceError::decode(SERVICE, e))?,
            ),
            DatasetKind::Geometry => Dataset::Geometry(
                response
                    .json()
                    .await
                    .map_err(|e| ServiceError::decode(SERVICE, e))?,
            ),
        };

        tracing::debug!(%kind, rows = dataset.len(), "dataset fetched");
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_stub, test_client};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use std::time::Duration;

    fn stub_routes() -> Router {
        Router::new()
            .route(
                "/api/experiment",
                get(|| async {
                    Json(serde_json::json!([
                        {"propeller_brand": "APC", "propeller_diameter": 10.0, "rpm_rotation_input": 4000},
                        {"propeller_brand": "APC", "propeller_diameter": 10.0, "rpm_rotation_input": 4000},
                        {"propeller_brand": "Graupner", "propeller_diameter": 9.0, "efficiency_output": null}
                    ]))
                }),
            )
            .route(
                "/api/geometry",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "csv missing") }),
            )
    }

    #[tokio::test]
    async fn test_fetch_preserves_order_and_duplicates() {
        let base = spawn_stub(stub_routes()).await;
        let source = HttpDatasetSource::new(test_client(Duration::from_secs(5)), base);

        let dataset = source.fetch(DatasetKind::Experiment).await.unwrap();
        match dataset {
            Dataset::Experiment(rows) => {
                assert_eq!(rows.len(), 3);
                assert_eq!(rows[0], rows[1]);
                assert_eq!(rows[2].propeller_brand.as_deref(), Some("Graupner"));
            }
            other => panic!("unexpected dataset {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let base = spawn_stub(stub_routes()).await;
        let source = HttpDatasetSource::new(test_client(Duration::from_secs(5)), base);

        let err = source.fetch(DatasetKind::Geometry).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let slow = Router::new().route(
            "/api/experiment",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!([]))
            }),
        );
        let base = spawn_stub(slow).await;
        let source = HttpDatasetSource::new(test_client(Duration::from_millis(100)), base);

        let err = source.fetch(DatasetKind::Experiment).await.unwrap_err();
        assert!(matches!(err, ServiceError::Timeout(_)));
    }
}
