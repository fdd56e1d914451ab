//! Container for the Leaflet station map.

use dioxus::prelude::*;

/// Props for StationMap
#[derive(Props, Clone, PartialEq)]
pub struct StationMapProps {
    /// The DOM id for the map container (Leaflet will render into this)
    pub id: String,
    /// Map height in pixels. Leaflet needs an explicit height.
    #[props(default = 420)]
    pub height: u32,
}

/// A container div for the Leaflet map. The map itself is drawn by
/// `js_bridge::render_station_map` once stations are loaded.
#[component]
pub fn StationMap(props: StationMapProps) -> Element {
    let style = format!(
        "height: {}px; width: 100%; border-radius: 4px; border: 1px solid #ddd;",
        props.height
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
        }
    }
}
