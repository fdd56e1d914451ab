//! Page header with title and optional subtitle.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PageHeaderProps {
    /// Dashboard title
    pub title: String,
    /// Short line below the title
    #[props(default = String::new())]
    pub subtitle: String,
}

/// Header shown at the top of the dashboard.
#[component]
pub fn PageHeader(props: PageHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 16px;",
            h1 {
                style: "margin: 0 0 4px 0; font-size: 24px;",
                "{props.title}"
            }
            if !props.subtitle.is_empty() {
                p {
                    style: "margin: 0; font-size: 14px; color: #666;",
                    "{props.subtitle}"
                }
            }
        }
    }
}
