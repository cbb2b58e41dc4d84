//! Test doubles for the remote services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tokio::sync::Notify;

use crate::config::Config;
use crate::dataset::{Dataset, DatasetKind, DatasetSource, ExperimentRow, GeometryRow};
use crate::error::ServiceError;
use crate::prediction::{PredictionInput, PredictionResult, PredictionService};
use crate::session::SessionStore;
use crate::AppState;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn test_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder().timeout(timeout).build().unwrap()
}

pub fn experiment_rows(n: usize) -> Vec<ExperimentRow> {
    (0..n)
        .map(|i| ExperimentRow {
            propeller_brand: Some(["APC", "Graupner", "Master Airscrew"][i % 3].to_string()),
            propeller_diameter: Some(10.0),
            propeller_pitch: Some(4.7),
            number_of_blades: Some(2.0),
            rpm_rotation_input: Some(4000.0 + i as f64),
            thrust_coefficient_output: Some(0.1),
            power_coefficient_output: Some(0.05),
            efficiency_output: Some(0.6),
        })
        .collect()
}

pub fn geometry_rows(n: usize) -> Vec<GeometryRow> {
    (0..n)
        .map(|i| GeometryRow {
            blade_name: Some("apc_10x7".to_string()),
            propeller_brand: Some("APC".to_string()),
            propeller_diameter: Some(10.0),
            propeller_pitch: Some(7.0),
            chord_ratio: Some(0.16),
            radius_ratio: Some(0.15 + 0.05 * i as f64),
            beta: Some(30.0 - i as f64),
        })
        .collect()
}

/// Dataset source with fixed row counts.
pub struct FakeDatasets {
    experiment: usize,
    geometry: usize,
    fail: bool,
}

impl FakeDatasets {
    pub fn with_rows(experiment: usize, geometry: usize) -> Self {
        Self {
            experiment,
            geometry,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            experiment: 0,
            geometry: 0,
            fail: true,
        }
    }
}

#[async_trait]
impl DatasetSource for FakeDatasets {
    async fn fetch(&self, kind: DatasetKind) -> Result<Dataset, ServiceError> {
        if self.fail {
            return Err(ServiceError::Status {
                service: "dataset service",
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(match kind {
            DatasetKind::Experiment => Dataset::Experiment(experiment_rows(self.experiment)),
            DatasetKind::Geometry => Dataset::Geometry(geometry_rows(self.geometry)),
        })
    }
}

/// Experiment fetches block until released; geometry returns two rows at once.
#[derive(Default)]
pub struct GatedDatasets {
    pub experiment_started: Notify,
    pub release_experiment: Notify,
}

#[async_trait]
impl DatasetSource for GatedDatasets {
    async fn fetch(&self, kind: DatasetKind) -> Result<Dataset, ServiceError> {
        match kind {
            DatasetKind::Experiment => {
                self.experiment_started.notify_one();
                self.release_experiment.notified().await;
                Ok(Dataset::Experiment(experiment_rows(40)))
            }
            DatasetKind::Geometry => Ok(Dataset::Geometry(geometry_rows(2))),
        }
    }
}

/// Prediction service returning fixed coefficients.
pub struct FakePredictor {
    result: Option<(f64, f64, f64)>,
    calls: AtomicUsize,
}

impl FakePredictor {
    pub fn returning(thrust: f64, power: f64, efficiency: f64) -> Self {
        Self {
            result: Some((thrust, power, efficiency)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionService for FakePredictor {
    async fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.result {
            Some((thrust, power, efficiency)) => Ok(PredictionResult {
                thrust_coefficient: thrust,
                power_coefficient: power,
                efficiency,
                matched_brand: Some("APC".into()),
                matched_diameter: Some(10.0),
                matched_pitch: Some(4.5),
            }),
            None => Err(ServiceError::Timeout("prediction service")),
        }
    }
}

/// Prediction service that blocks until released, then answers like a
/// delivery propeller.
#[derive(Default)]
pub struct GatedPredictor {
    pub started: Notify,
    pub release: Notify,
}

#[async_trait]
impl PredictionService for GatedPredictor {
    async fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult, ServiceError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(PredictionResult {
            thrust_coefficient: 0.12,
            power_coefficient: 0.07,
            efficiency: 0.5,
            matched_brand: None,
            matched_diameter: None,
            matched_pitch: None,
        })
    }
}

/// Application state wired to in-process fakes.
pub fn test_state(predictor: FakePredictor, datasets: FakeDatasets) -> AppState {
    test_state_with(Arc::new(predictor), Arc::new(datasets))
}

pub fn test_state_with(
    predictor: Arc<dyn PredictionService>,
    datasets: Arc<dyn DatasetSource>,
) -> AppState {
    let config = Config::default();
    AppState {
        sessions: SessionStore::new(config.max_sessions, config.session_idle),
        config: Arc::new(config),
        predictor,
        datasets,
    }
}
