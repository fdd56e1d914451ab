//! Download buttons for CSV and HTML exports.

use dioxus::prelude::*;

const BUTTON_STYLE: &str = "padding: 8px 14px; border: 1px solid #1565C0; border-radius: 4px; background: white; color: #1565C0; cursor: pointer; font-size: 13px;";

/// Three export buttons: the station's raw CSV, the windowed CSV and a
/// standalone HTML chart. The handlers live in the app, which owns the
/// cached CSV text and the chart data.
#[component]
pub fn DownloadButtons(
    on_csv_full: EventHandler<()>,
    on_csv_filtered: EventHandler<()>,
    on_html: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; gap: 12px; margin: 12px 0; flex-wrap: wrap;",
            button {
                style: BUTTON_STYLE,
                onclick: move |_| on_csv_full.call(()),
                "📥 CSV (gesamter Zeitraum)"
            }
            button {
                style: BUTTON_STYLE,
                onclick: move |_| on_csv_filtered.call(()),
                "📥 CSV (gefilterter Zeitraum)"
            }
            button {
                style: BUTTON_STYLE,
                onclick: move |_| on_html.call(()),
                "📥 Diagramm als HTML"
            }
        }
    }
}
