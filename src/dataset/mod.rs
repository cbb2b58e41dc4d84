//! Dataset browsing.
//!
//! Loads the experimental or geometrical propeller dataset from the dataset
//! service and serves paginated views and CSV exports of it. All paging
//! happens locally on the full array the service returns.

mod browser;
mod export;
mod models;
mod source;
mod state;

pub use browser::DatasetBrowser;
pub use models::{Dataset, DatasetKind, ExperimentRow, GeometryRow, PageSize};
pub use source::{DatasetSource, HttpDatasetSource};
pub use state::BrowserView;
