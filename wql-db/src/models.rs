//! Query result model structs for the dashboard.
//!
//! All structs derive `Serialize` so they can be passed to the Leaflet
//! map and D3 chart scripts as JSON from the Dioxus WASM frontend.

use serde::Serialize;

/// Station metadata for the map and selection labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationInfo {
    pub number: u32,
    pub name: String,
    /// Operator or program the station belongs to (Quelle).
    pub source: String,
    /// The lake or stream being sampled (Gewässer).
    pub water_body: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Parameter metadata for the selector and axis labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParameterInfo {
    /// Normalized name, the query key.
    pub name: String,
    /// Original CSV header, what the user sees.
    pub original_name: String,
    /// Unit derived from the header, if any.
    pub unit: Option<String>,
}

/// A single chart point. `date` is ISO (`YYYY-MM-DD`); `time` is the
/// sampling time of day or empty.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesValue {
    pub date: String,
    pub time: String,
    pub value: f64,
}

/// A regulatory limit with its registry and context notes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LimitInfo {
    pub parameter: String,
    pub original_name: String,
    pub limit_value: f64,
    pub cas: Option<String>,
    pub context: Option<String>,
}

/// The most recent reading inside a window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatestValue {
    pub date: String,
    pub value: f64,
}
