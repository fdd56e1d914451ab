//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use chrono::NaiveDate;
use dioxus::prelude::*;
use wql_core::time_range::TimeRange;
use wql_db::models::{ParameterInfo, StationInfo};
use wql_db::WaterDb;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Session database for the selected station (None until loaded)
    pub db: Signal<Option<WaterDb>>,
    /// Whether the station list is still loading
    pub loading: Signal<bool>,
    /// Whether a station's measurement file is still loading
    pub series_loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Informational note (empty window, missing limit and the like)
    pub info_msg: Signal<Option<String>>,
    /// Stations shown on the map
    pub stations: Signal<Vec<StationInfo>>,
    /// Currently selected station number (None until a marker is clicked)
    pub selected_station: Signal<Option<u32>>,
    /// Parameter columns of the selected station's file
    pub parameters: Signal<Vec<ParameterInfo>>,
    /// Normalized name of the parameter being charted
    pub selected_parameter: Signal<Option<String>>,
    /// Chosen time range preset
    pub time_range: Signal<TimeRange>,
    /// Custom range start as typed into the date input (ISO)
    pub custom_start: Signal<String>,
    /// Custom range end as typed into the date input (ISO)
    pub custom_end: Signal<String>,
    /// First and last measurement date of the selected station
    pub data_span: Signal<Option<(NaiveDate, NaiveDate)>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            series_loading: Signal::new(false),
            error_msg: Signal::new(None),
            info_msg: Signal::new(None),
            stations: Signal::new(Vec::new()),
            selected_station: Signal::new(None),
            parameters: Signal::new(Vec::new()),
            selected_parameter: Signal::new(None),
            time_range: Signal::new(TimeRange::FullSpan),
            custom_start: Signal::new(String::new()),
            custom_end: Signal::new(String::new()),
            data_span: Signal::new(None),
        }
    }
}
