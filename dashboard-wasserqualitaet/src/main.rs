//! H20HL - Wasserqualität im Großraum Lübeck
//!
//! Interactive dashboard for the published water quality measurements of
//! lakes and streams around Lübeck.
//!
//! Data flow:
//! 1. On mount: fetch `Messpunkte.csv` and draw the Leaflet station map,
//!    markers colored by data source.
//! 2. On marker click: fetch the station's measurement file plus the limit
//!    and info tables into a fresh in-memory SQLite session database.
//! 3. On parameter or time range change: query the windowed series and
//!    render the D3 chart with the limit line and traffic light metrics.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use dioxus::prelude::*;

use wql_chart_ui::components::{
    ChartContainer, DownloadButtons, ErrorDisplay, InfoNote, LimitMetrics, LoadingSpinner,
    PageHeader, ParameterSelector, StationMap, TimeRangePicker,
};
use wql_chart_ui::js_bridge;
use wql_chart_ui::state::AppState;
use wql_core::export;
use wql_core::fetch::DataClient;
use wql_core::locale::{format_decimal, format_decimal_fixed};
use wql_core::measurement::MeasurementTable;
use wql_core::station::source_colors;
use wql_core::status::{classify, Direction};
use wql_core::time_range::{DateWindow, TimeRange};
use wql_db::models::{LatestValue, LimitInfo, StationInfo};
use wql_db::WaterDb;

/// DOM id for the Leaflet map container div.
const MAP_CONTAINER_ID: &str = "station-map";
/// DOM id for the D3 chart container div.
const CHART_CONTAINER_ID: &str = "series-chart";

/// Initial map view over the Lübeck area.
const MAP_CENTER: (f64, f64) = (53.8677, 10.68508);
const MAP_ZOOM: u32 = 12;

/// Format emitted by HTML date inputs and stored in the database.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("wasserqualitaet-root"))
        .launch(App);
}

/// Display strings for the metric boxes, derived once per chart render.
#[derive(Clone, PartialEq)]
struct MetricsData {
    limit_text: String,
    cas: String,
    context: String,
    latest_text: String,
    latest_date: String,
    status_label: String,
    status_color: String,
}

/// Fetch the station list and return it as typed rows via a throwaway
/// session database.
async fn load_stations(client: &DataClient) -> anyhow::Result<Vec<StationInfo>> {
    let csv_text = client.stations_csv().await?;
    let db = WaterDb::new()?;
    db.load_stations(&csv_text)?;
    Ok(db.query_stations()?)
}

/// Fetch one station's measurement file and the shared limit/info tables
/// into a fresh session database. Limits and info texts are optional; the
/// chart works without them.
async fn load_station_session(
    client: &DataClient,
    number: u32,
) -> anyhow::Result<(WaterDb, String)> {
    let csv_text = client.measurements_csv(number).await?;
    let db = WaterDb::new()?;
    db.load_measurements(&csv_text)?;

    match client.limits_csv().await {
        Ok(text) => {
            if let Err(err) = db.load_limits(&text) {
                log::warn!("[WQL] Grenzwerte konnten nicht geladen werden: {err}");
            }
        }
        Err(err) => log::warn!("[WQL] Grenzwerte konnten nicht geladen werden: {err}"),
    }
    match client.info_boxes_csv().await {
        Ok(text) => {
            if let Err(err) = db.load_info_boxes(&text) {
                log::warn!("[WQL] Infotexte konnten nicht geladen werden: {err}");
            }
        }
        Err(err) => log::warn!("[WQL] Infotexte konnten nicht geladen werden: {err}"),
    }

    Ok((db, csv_text))
}

/// Draw the Leaflet map with one colored marker per station.
fn render_map(stations: &[StationInfo]) {
    let colors: HashMap<String, &'static str> =
        source_colors(stations.iter().map(|s| s.source.as_str()))
            .into_iter()
            .collect();

    let markers: Vec<serde_json::Value> = stations
        .iter()
        .map(|s| {
            serde_json::json!({
                "number": s.number,
                "name": s.name,
                "water_body": s.water_body,
                "latitude": s.latitude,
                "longitude": s.longitude,
                "color": colors.get(&s.source).copied().unwrap_or("blue"),
            })
        })
        .collect();

    let data_json = serde_json::to_string(&markers).unwrap_or_default();
    let config_json = serde_json::json!({
        "center": [MAP_CENTER.0, MAP_CENTER.1],
        "zoom": MAP_ZOOM,
    })
    .to_string();

    js_bridge::render_station_map(MAP_CONTAINER_ID, &data_json, &config_json);
}

/// Resolve the chosen preset into a concrete window. The custom preset
/// needs both date inputs filled; presets other than the full span work
/// without the data span.
fn resolve_window(
    range: TimeRange,
    custom_start: &str,
    custom_end: &str,
    data_span: Option<(NaiveDate, NaiveDate)>,
) -> Option<DateWindow> {
    match range {
        TimeRange::Custom => {
            let start = NaiveDate::parse_from_str(custom_start, DATE_INPUT_FORMAT).ok()?;
            let end = NaiveDate::parse_from_str(custom_end, DATE_INPUT_FORMAT).ok()?;
            Some(DateWindow::new(start, end))
        }
        other => other.resolve(Utc::now().date_naive(), data_span),
    }
}

/// Append the unit when one is known: "13 mg/l", "12,9600 mg/l".
fn with_unit(text: String, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{text} {unit}"),
        None => text,
    }
}

/// ISO date to day-first display form.
fn format_display_date(iso_date: &str) -> String {
    NaiveDate::parse_from_str(iso_date, DATE_INPUT_FORMAT)
        .map(|date| date.format(export::EXPORT_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| iso_date.to_string())
}

/// Compare the newest reading against the limit and build the metric box
/// strings. Yields nothing when either side is missing. The newest reading
/// is shown with fixed four decimals, the limit as published.
fn build_metrics(
    parameter: &str,
    unit: Option<&str>,
    limit: Option<&LimitInfo>,
    latest: Option<&LatestValue>,
) -> Option<MetricsData> {
    let limit = limit?;
    let latest = latest?;
    let direction = Direction::for_parameter(parameter);
    let status = classify(latest.value, limit.limit_value, direction)?;
    Some(MetricsData {
        limit_text: with_unit(format_decimal(limit.limit_value, 6), unit),
        cas: limit.cas.clone().unwrap_or_default(),
        context: limit.context.clone().unwrap_or_default(),
        latest_text: with_unit(format_decimal_fixed(latest.value, 4), unit),
        latest_date: format_display_date(&latest.date),
        status_label: status.label().to_string(),
        status_color: status.color().to_string(),
    })
}

/// Download the station's measurement file exactly as published.
fn download_full_csv(state: AppState, measurements_csv: Signal<Option<String>>) {
    let Some(number) = *state.selected_station.peek() else {
        return;
    };
    if let Some(csv_text) = measurements_csv.peek().as_ref() {
        js_bridge::trigger_download(&format!("{number}_Messwerte.csv"), "text/csv", csv_text);
    }
}

/// Re-parse the cached file, apply the current window and download the
/// result in the published CSV dialect.
fn download_filtered_csv(state: AppState, measurements_csv: Signal<Option<String>>) {
    let Some(number) = *state.selected_station.peek() else {
        return;
    };
    let cached: Option<String> = measurements_csv.peek().clone();
    let Some(csv_text) = cached else {
        return;
    };
    let range = *state.time_range.peek();
    let custom_start: String = state.custom_start.peek().clone();
    let custom_end: String = state.custom_end.peek().clone();
    let data_span = *state.data_span.peek();
    let Some(window) = resolve_window(range, &custom_start, &custom_end, data_span) else {
        return;
    };

    let exported = MeasurementTable::parse_measurement_csv(&csv_text)
        .map(|table| table.for_station(number).filter_window(&window))
        .and_then(|filtered| export::measurement_csv(&filtered));
    match exported {
        Ok(out) => js_bridge::trigger_download(
            &format!("{number}_Messwerte_gefiltert.csv"),
            "text/csv",
            &out,
        ),
        Err(err) => log::error!("[WQL] CSV-Export fehlgeschlagen: {err}"),
    }
}

/// Download the current chart as a standalone Vega-Lite HTML page.
fn download_chart_html(state: AppState) {
    let session: Option<WaterDb> = state.db.peek().clone();
    let Some(db) = session else {
        return;
    };
    let Some(number) = *state.selected_station.peek() else {
        return;
    };
    let selected: Option<String> = state.selected_parameter.peek().clone();
    let Some(parameter) = selected else {
        return;
    };
    let range = *state.time_range.peek();
    let custom_start: String = state.custom_start.peek().clone();
    let custom_end: String = state.custom_end.peek().clone();
    let data_span = *state.data_span.peek();
    let Some(window) = resolve_window(range, &custom_start, &custom_end, data_span) else {
        return;
    };

    let series = match db.query_series(number, &parameter, &window) {
        Ok(series) => series,
        Err(err) => {
            log::error!("[WQL] HTML-Export fehlgeschlagen: {err}");
            return;
        }
    };
    let values: Vec<(String, f64)> = series
        .iter()
        .map(|point| (point.date.clone(), point.value))
        .collect();
    let limit = match db.query_limit(&parameter) {
        Ok(limit) => limit.map(|entry| entry.limit_value),
        Err(_) => None,
    };

    let label = state
        .parameters
        .peek()
        .iter()
        .find(|p| p.name == parameter)
        .map(|p| p.original_name.clone())
        .unwrap_or_else(|| parameter.clone());
    let station_name = state
        .stations
        .peek()
        .iter()
        .find(|s| s.number == number)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| number.to_string());

    let title = format!("{station_name}: {label}");
    let spec = export::vega_spec(&title, &label, &values, limit);
    let html = export::chart_html(&title, &spec);
    js_bridge::trigger_download(&format!("Diagramm_{number}.html"), "text/html", &html);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let client = use_signal(DataClient::new);

    // Raw CSV text of the selected station's file, kept for the downloads.
    let mut measurements_csv: Signal<Option<String>> = use_signal(|| None);
    // Display strings for the metric boxes.
    let mut metrics: Signal<Option<MetricsData>> = use_signal(|| None);
    // Info text for the selected parameter from Infobox.csv.
    let mut parameter_info: Signal<Option<String>> = use_signal(|| None);

    // ─── Effect 1: Fetch stations once on mount, then watch marker clicks ───
    use_effect(move || {
        let client: DataClient = client.peek().clone();
        spawn(async move {
            js_bridge::init_scripts();
            match load_stations(&client).await {
                Ok(stations) => {
                    render_map(&stations);
                    state.stations.set(stations);
                    state.loading.set(false);
                }
                Err(err) => {
                    log::error!("[WQL] Messstationen laden fehlgeschlagen: {err}");
                    state
                        .error_msg
                        .set(Some("Messstationen konnten nicht geladen werden".to_string()));
                    state.loading.set(false);
                    return;
                }
            }

            // Marker clicks land in a window slot; poll it from here.
            js_bridge::clear_selected_station();
            loop {
                js_bridge::sleep_ms(300).await;
                if let Some(number) = js_bridge::selected_station() {
                    if *state.selected_station.peek() != Some(number) {
                        state.selected_station.set(Some(number));
                    }
                }
            }
        });
    });

    // ─── Effect 2: Load the station's session database on selection ───
    use_effect(move || {
        let Some(number) = (state.selected_station)() else {
            return;
        };

        // Reset the previous station's session before fetching the next.
        state.db.set(None);
        state.series_loading.set(true);
        state.error_msg.set(None);
        state.info_msg.set(None);
        metrics.set(None);
        parameter_info.set(None);
        measurements_csv.set(None);
        js_bridge::destroy_chart(CHART_CONTAINER_ID);

        let client: DataClient = client.peek().clone();
        spawn(async move {
            let loaded = load_station_session(&client, number).await;
            // In-flight tasks are not cancelled when the selection changes;
            // a response for a superseded selection must not be committed.
            if *state.selected_station.peek() != Some(number) {
                return;
            }
            match loaded {
                Ok((db, csv_text)) => {
                    match db.query_parameters() {
                        Ok(parameters) if !parameters.is_empty() => {
                            state
                                .selected_parameter
                                .set(Some(parameters[0].name.clone()));
                            state.parameters.set(parameters);
                        }
                        Ok(_) => {
                            state.selected_parameter.set(None);
                            state.parameters.set(Vec::new());
                            state.error_msg.set(Some(
                                "Keine numerischen Messwerte zum Anzeigen gefunden".to_string(),
                            ));
                        }
                        Err(err) => {
                            log::error!("[WQL] Parameter-Abfrage fehlgeschlagen: {err}");
                            state
                                .error_msg
                                .set(Some("Messwerte konnten nicht geladen werden".to_string()));
                        }
                    }
                    match db.query_date_range(number) {
                        Ok(span) => state.data_span.set(span),
                        Err(err) => {
                            log::warn!("[WQL] Zeitspanne nicht bestimmbar: {err}");
                            state.data_span.set(None);
                        }
                    }
                    measurements_csv.set(Some(csv_text));
                    state.db.set(Some(db));
                }
                Err(err) => {
                    log::error!("[WQL] Messwerte laden fehlgeschlagen: {err}");
                    state
                        .error_msg
                        .set(Some("Messwerte konnten nicht geladen werden".to_string()));
                }
            }
            state.series_loading.set(false);
        });
    });

    // ─── Effect 3: Query the windowed series and render the chart ───
    // Re-runs whenever the session db, parameter, or time range change.
    use_effect(move || {
        if (state.series_loading)() {
            return;
        }
        let Some(db) = (state.db)() else {
            return;
        };
        let Some(number) = (state.selected_station)() else {
            return;
        };
        let Some(parameter) = (state.selected_parameter)() else {
            return;
        };
        let range = (state.time_range)();
        let custom_start = (state.custom_start)();
        let custom_end = (state.custom_end)();
        let data_span = (state.data_span)();

        let Some(window) = resolve_window(range, &custom_start, &custom_end, data_span) else {
            if range == TimeRange::Custom {
                state.info_msg.set(Some("Bitte Zeitraum wählen".to_string()));
            } else {
                state.info_msg.set(Some(
                    "Zeitraum konnte nicht bestimmt werden - keine Messdaten vorhanden"
                        .to_string(),
                ));
            }
            metrics.set(None);
            js_bridge::destroy_chart(CHART_CONTAINER_ID);
            return;
        };

        let series = match db.query_series(number, &parameter, &window) {
            Ok(series) => series,
            Err(err) => {
                log::error!("[WQL] Messreihen-Abfrage fehlgeschlagen: {err}");
                return;
            }
        };
        let limit = match db.query_limit(&parameter) {
            Ok(limit) => limit,
            Err(err) => {
                log::warn!("[WQL] Grenzwert-Abfrage fehlgeschlagen: {err}");
                None
            }
        };
        let latest = match db.query_latest(number, &parameter, &window) {
            Ok(latest) => latest,
            Err(err) => {
                log::warn!("[WQL] Abfrage des neuesten Messwerts fehlgeschlagen: {err}");
                None
            }
        };
        match db.query_info(&parameter) {
            Ok(info) => parameter_info.set(info),
            Err(_) => parameter_info.set(None),
        }

        let display = state
            .parameters
            .peek()
            .iter()
            .find(|p| p.name == parameter)
            .cloned();
        let label = display
            .as_ref()
            .map(|p| p.original_name.clone())
            .unwrap_or_else(|| parameter.clone());
        let unit = display.and_then(|p| p.unit);

        if series.is_empty() {
            state.info_msg.set(Some(
                "Keine Messwerte im gewählten Zeitraum - zeige leeres Diagramm".to_string(),
            ));
        } else if limit.is_none() {
            state
                .info_msg
                .set(Some(format!("Keine Grenzwerte für '{label}' definiert")));
        } else {
            state.info_msg.set(None);
        }

        metrics.set(build_metrics(
            &parameter,
            unit.as_deref(),
            limit.as_ref(),
            latest.as_ref(),
        ));

        let chart_data: Vec<serde_json::Value> = series
            .iter()
            .map(|point| {
                serde_json::json!({
                    "date": point.date,
                    "time": point.time,
                    "value": point.value,
                })
            })
            .collect();
        let data_json = serde_json::to_string(&chart_data).unwrap_or_default();
        let config_json = serde_json::json!({
            "yLabel": label,
            "limit": limit.as_ref().map(|entry| entry.limit_value),
            "windowStart": window.start.format(DATE_INPUT_FORMAT).to_string(),
            "windowEnd": window.end.format(DATE_INPUT_FORMAT).to_string(),
        })
        .to_string();

        js_bridge::render_series_chart(CHART_CONTAINER_ID, &data_json, &config_json);
    });

    // ─── Render ───
    let selected_info = (state.selected_station)().and_then(|number| {
        state
            .stations
            .read()
            .iter()
            .find(|s| s.number == number)
            .cloned()
    });

    rsx! {
        div {
            style: "max-width: 960px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            PageHeader {
                title: "H20HL - Wasserqualität im Großraum Lübeck".to_string(),
                subtitle: "Messwerte und Grenzwerte der Gewässer rund um Lübeck".to_string(),
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else if !state.stations.read().is_empty() {
                StationMap { id: MAP_CONTAINER_ID.to_string() }

                if let Some(station) = selected_info {
                    div {
                        style: "margin-top: 16px;",
                        h2 {
                            style: "margin: 0 0 2px 0; font-size: 18px;",
                            "{station.name}"
                        }
                        p {
                            style: "margin: 0 0 8px 0; font-size: 13px; color: #666;",
                            "Gewässer: {station.water_body} (Quelle: {station.source})"
                        }

                        if !state.parameters.read().is_empty() {
                            TimeRangePicker {}
                            ParameterSelector {}

                            if let Some(info) = parameter_info.read().as_ref() {
                                InfoNote { message: info.clone() }
                            }
                            if let Some(msg) = state.info_msg.read().as_ref() {
                                InfoNote { message: msg.clone() }
                            }
                            if let Some(m) = metrics.read().as_ref() {
                                LimitMetrics {
                                    limit_text: m.limit_text.clone(),
                                    cas: m.cas.clone(),
                                    context: m.context.clone(),
                                    latest_text: m.latest_text.clone(),
                                    latest_date: m.latest_date.clone(),
                                    status_label: m.status_label.clone(),
                                    status_color: m.status_color.clone(),
                                }
                            }

                            ChartContainer {
                                id: CHART_CONTAINER_ID.to_string(),
                                loading: *state.series_loading.read(),
                            }

                            DownloadButtons {
                                on_csv_full: move |_| download_full_csv(state, measurements_csv),
                                on_csv_filtered: move |_| download_filtered_csv(state, measurements_csv),
                                on_html: move |_| download_chart_html(state),
                            }
                        }
                    }
                } else {
                    InfoNote { message: "Bitte Messpunkt wählen".to_string() }
                }
            }
        }
    }
}
