//! Metric boxes for the limit, the newest reading and its status.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LimitMetricsProps {
    /// Formatted limit, e.g. "13 mg/l"
    pub limit_text: String,
    /// CAS registry number of the substance, when the limit table has one
    #[props(default = String::new())]
    pub cas: String,
    /// Regulatory context of the limit, when the limit table has one
    #[props(default = String::new())]
    pub context: String,
    /// Formatted newest reading, e.g. "12,3 mg/l"
    pub latest_text: String,
    /// Day-first date of the newest reading
    pub latest_date: String,
    /// Traffic light label, e.g. "🟢 Grün (OK)"
    pub status_label: String,
    /// Badge background color as a CSS hex value
    pub status_color: String,
}

/// Side-by-side metric boxes comparing the newest reading against the
/// limit, with a traffic light badge.
#[component]
pub fn LimitMetrics(props: LimitMetricsProps) -> Element {
    let badge_style = format!(
        "display: inline-block; padding: 6px 12px; border-radius: 4px; color: white; font-weight: bold; background: {};",
        props.status_color
    );

    rsx! {
        div {
            style: "display: flex; gap: 16px; margin: 12px 0; flex-wrap: wrap; align-items: stretch;",
            div {
                style: "padding: 12px 16px; background: #FAFAFA; border: 1px solid #eee; border-radius: 4px; min-width: 180px;",
                div {
                    style: "font-size: 12px; color: #666;",
                    "Grenzwert"
                }
                div {
                    style: "font-size: 20px; font-weight: bold;",
                    "{props.limit_text}"
                }
                if !props.cas.is_empty() {
                    div {
                        style: "font-size: 11px; color: #888;",
                        "CAS-Nr: {props.cas}"
                    }
                }
                if !props.context.is_empty() {
                    div {
                        style: "font-size: 11px; color: #888;",
                        "{props.context}"
                    }
                }
            }
            div {
                style: "padding: 12px 16px; background: #FAFAFA; border: 1px solid #eee; border-radius: 4px; min-width: 180px;",
                div {
                    style: "font-size: 12px; color: #666;",
                    "Neuester Messwert"
                }
                div {
                    style: "font-size: 20px; font-weight: bold;",
                    "{props.latest_text}"
                }
                div {
                    style: "font-size: 11px; color: #888;",
                    "vom {props.latest_date}"
                }
            }
            div {
                style: "display: flex; align-items: center;",
                span {
                    style: "{badge_style}",
                    "{props.status_label}"
                }
            }
        }
    }
}
