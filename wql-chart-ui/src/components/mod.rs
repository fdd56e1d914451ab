//! Reusable Dioxus RSX components for the water quality dashboard.

mod chart_container;
mod download_buttons;
mod error_display;
mod info_note;
mod limit_metrics;
mod loading_spinner;
mod page_header;
mod parameter_selector;
mod station_map;
mod time_range_picker;

pub use chart_container::ChartContainer;
pub use download_buttons::DownloadButtons;
pub use error_display::ErrorDisplay;
pub use info_note::InfoNote;
pub use limit_metrics::LimitMetrics;
pub use loading_spinner::LoadingSpinner;
pub use page_header::PageHeader;
pub use parameter_selector::ParameterSelector;
pub use station_map::StationMap;
pub use time_range_picker::TimeRangePicker;
