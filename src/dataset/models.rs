//! Data types for the propeller datasets.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Which remote dataset is being browsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    #[default]
    Experiment,
    Geometry,
}

impl DatasetKind {
    /// Path segment used by the dataset service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experiment => "experiment",
            Self::Geometry => "geometry",
        }
    }

    /// Summary label shown next to the table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Experiment => "Performance",
            Self::Geometry => "Geometry",
        }
    }

    /// File name offered for CSV downloads.
    pub fn export_filename(self) -> &'static str {
        match self {
            Self::Experiment => "experimental_dataset.csv",
            Self::Geometry => "geometrical_dataset.csv",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows per table page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    pub fn get(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Ten),
            25 => Ok(Self::TwentyFive),
            50 => Ok(Self::Fifty),
            other => Err(other),
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.get()
    }
}

/// A row that can be laid out as table cells.
pub trait TabularRow {
    /// Column names in export order.
    const COLUMNS: &'static [&'static str];

    /// Cell values in `COLUMNS` order; `None` for missing values.
    fn cells(&self) -> Vec<Option<String>>;

    /// Grouping field for the unique-brand summary.
    fn brand(&self) -> Option<&str>;
}

fn cell<T: ToString>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

/// Measured performance of one propeller at one operating point.
///
/// The same geometry appears many times at different RPMs; those rows are
/// distinct samples and are kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExperimentRow {
    pub propeller_brand: Option<String>,
    pub propeller_diameter: Option<f64>,
    pub propeller_pitch: Option<f64>,
    pub number_of_blades: Option<f64>,
    pub rpm_rotation_input: Option<f64>,
    pub thrust_coefficient_output: Option<f64>,
    pub power_coefficient_output: Option<f64>,
    pub efficiency_output: Option<f64>,
}

impl TabularRow for ExperimentRow {
    const COLUMNS: &'static [&'static str] = &[
        "propeller_brand",
        "propeller_diameter",
        "propeller_pitch",
        "number_of_blades",
        "rpm_rotation_input",
        "thrust_coefficient_output",
        "power_coefficient_output",
        "efficiency_output",
    ];

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            self.propeller_brand.clone(),
            cell(&self.propeller_diameter),
            cell(&self.propeller_pitch),
            cell(&self.number_of_blades),
            cell(&self.rpm_rotation_input),
            cell(&self.thrust_coefficient_output),
            cell(&self.power_coefficient_output),
            cell(&self.efficiency_output),
        ]
    }

    fn brand(&self) -> Option<&str> {
        self.propeller_brand.as_deref()
    }
}

/// Blade geometry sampled at one radial station.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GeometryRow {
    pub blade_name: Option<String>,
    pub propeller_brand: Option<String>,
    pub propeller_diameter: Option<f64>,
    pub propeller_pitch: Option<f64>,
    /// Chord over tip radius
    #[serde(rename = "c/R")]
    pub chord_ratio: Option<f64>,
    /// Radial station over tip radius
    #[serde(rename = "r/R")]
    pub radius_ratio: Option<f64>,
    /// Blade angle relative to rotation, degrees
    #[serde(rename = "beta_-_angle_relative_to_rotation")]
    pub beta: Option<f64>,
}

impl TabularRow for GeometryRow {
    const COLUMNS: &'static [&'static str] = &[
        "blade_name",
        "propeller_brand",
        "propeller_diameter",
        "propeller_pitch",
        "c/R",
        "r/R",
        "beta_-_angle_relative_to_rotation",
    ];

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            self.blade_name.clone(),
            self.propeller_brand.clone(),
            cell(&self.propeller_diameter),
            cell(&self.propeller_pitch),
            cell(&self.chord_ratio),
            cell(&self.radius_ratio),
            cell(&self.beta),
        ]
    }

    fn brand(&self) -> Option<&str> {
        self.propeller_brand.as_deref()
    }
}

/// Rows as last fetched, in service order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dataset {
    Experiment(Vec<ExperimentRow>),
    Geometry(Vec<GeometryRow>),
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty(DatasetKind::default())
    }
}

impl Dataset {
    pub fn empty(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Experiment => Self::Experiment(Vec::new()),
            DatasetKind::Geometry => Self::Geometry(Vec::new()),
        }
    }

    pub fn kind(&self) -> DatasetKind {
        match self {
            Self::Experiment(_) => DatasetKind::Experiment,
            Self::Geometry(_) => DatasetKind::Geometry,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Experiment(rows) => rows.len(),
            Self::Geometry(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the rows in `range`, clamped to the dataset length.
    pub fn slice(&self, range: Range<usize>) -> DatasetSlice<'_> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        match self {
            Self::Experiment(rows) => DatasetSlice::Experiment(&rows[start..end]),
            Self::Geometry(rows) => DatasetSlice::Geometry(&rows[start..end]),
        }
    }

    /// Number of distinct brands among the loaded rows.
    ///
    /// Only the rows the service returned are counted, not the full
    /// remote dataset. Rows without a brand together count as one value.
    pub fn unique_brand_count(&self) -> usize {
        match self {
            Self::Experiment(rows) => count_brands(rows),
            Self::Geometry(rows) => count_brands(rows),
        }
    }
}

fn count_brands<R: TabularRow>(rows: &[R]) -> usize {
    rows.iter()
        .map(|row| row.brand())
        .collect::<HashSet<Option<&str>>>()
        .len()
}

/// Borrowed window into a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DatasetSlice<'a> {
    Experiment(&'a [ExperimentRow]),
    Geometry(&'a [GeometryRow]),
}

impl DatasetSlice<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Experiment(rows) => rows.len(),
            Self::Geometry(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_dataset(&self) -> Dataset {
        match self {
            Self::Experiment(rows) => Dataset::Experiment(rows.to_vec()),
            Self::Geometry(rows) => Dataset::Geometry(rows.to_vec()),
        }
    }
}
