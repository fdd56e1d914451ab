//! Informational note component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct InfoNoteProps {
    pub message: String,
}

/// Displays an informational note in a styled box.
#[component]
pub fn InfoNote(props: InfoNoteProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #E3F2FD; color: #1565C0; border-radius: 4px; border: 1px solid #90CAF9;",
            "ℹ️ {props.message}"
        }
    }
}
