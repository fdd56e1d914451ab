//! Dropdown selector for choosing a measurement parameter.

use crate::state::AppState;
use dioxus::prelude::*;

/// Parameter dropdown selector.
/// Reads available parameters from AppState and updates selected_parameter
/// on change. Options show the original CSV header; values carry the
/// normalized name used as query key.
#[component]
pub fn ParameterSelector() -> Element {
    let mut state = use_context::<AppState>();
    let parameters = state.parameters.read().clone();
    let selected = (state.selected_parameter)().unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        state.selected_parameter.set(Some(value));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "parameter-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Messwert: "
            }
            select {
                id: "parameter-select",
                onchange: on_change,
                for parameter in parameters.iter() {
                    option {
                        value: "{parameter.name}",
                        selected: parameter.name == selected,
                        "{parameter.original_name}"
                    }
                }
            }
        }
    }
}
