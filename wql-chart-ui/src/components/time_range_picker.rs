//! Time range preset selector with custom date inputs.

use crate::state::AppState;
use dioxus::prelude::*;
use wql_core::time_range::TimeRange;

/// Dropdown for the time range presets. When "Benutzerdefiniert" is
/// chosen, two date inputs appear and feed the custom window.
#[component]
pub fn TimeRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.time_range)();
    let custom_start = (state.custom_start)();
    let custom_end = (state.custom_end)();

    let on_range_change = move |evt: Event<FormData>| {
        if let Some(range) = TimeRange::from_label(&evt.value()) {
            state.time_range.set(range);
        }
    };

    let on_start_change = move |evt: Event<FormData>| {
        state.custom_start.set(evt.value());
    };

    let on_end_change = move |evt: Event<FormData>| {
        state.custom_end.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
            label {
                style: "font-weight: bold;",
                "Zeitraum: "
                select {
                    onchange: on_range_change,
                    for choice in TimeRange::CHOICES.iter() {
                        option {
                            value: choice.label(),
                            selected: *choice == current,
                            {choice.label()}
                        }
                    }
                }
            }
            if current == TimeRange::Custom {
                label {
                    style: "font-weight: bold;",
                    "Von: "
                    input {
                        r#type: "date",
                        value: "{custom_start}",
                        onchange: on_start_change,
                    }
                }
                label {
                    style: "font-weight: bold;",
                    "Bis: "
                    input {
                        r#type: "date",
                        value: "{custom_end}",
                        onchange: on_end_change,
                    }
                }
            }
        }
    }
}
