//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The map and chart are drawn by Leaflet and D3.js from `assets/js/*.js`,
//! loaded at runtime from CDN script tags in index.html. The asset scripts
//! are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module provides safe Rust wrappers that serialize data and call
//! those globals.

use wasm_bindgen::JsValue;

// Embed the bridge JS files at compile time
static STATION_MAP_JS: &str = include_str!("../assets/js/station-map.js");
static SERIES_CHART_JS: &str = include_str!("../assets/js/series-chart.js");
static DOWNLOAD_JS: &str = include_str!("../assets/js/download.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('[WQL] JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Load the bridge scripts with a wait-for-libraries polling loop. Call
/// once at app startup.
///
/// The asset files define functions like `renderStationMap(...)` via
/// `function` declarations. To ensure they become globally accessible
/// (not block-scoped inside the setInterval callback), we evaluate them
/// at global scope via indirect eval once Leaflet and D3 are both ready,
/// and then explicitly promote each function to `window.*`.
pub fn init_scripts() {
    let all_js = [STATION_MAP_JS, SERIES_CHART_JS, DOWNLOAD_JS].join("\n");
    log::info!("[WQL] loading chart bridge ({} bytes of JS)", all_js.len());

    // Store the scripts on window so the polling callback can eval them
    // at global scope (not block-scoped inside setInterval).
    let store_js = format!(
        "window.__wqlScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__wqlScripts);
                    delete window.__wqlScripts;
                    // Promote function declarations to window explicitly
                    if (typeof renderStationMap !== 'undefined') window.renderStationMap = renderStationMap;
                    if (typeof destroyStationMap !== 'undefined') window.destroyStationMap = destroyStationMap;
                    if (typeof renderSeriesChart !== 'undefined') window.renderSeriesChart = renderSeriesChart;
                    if (typeof destroySeriesChart !== 'undefined') window.destroySeriesChart = destroySeriesChart;
                    if (typeof downloadTextFile !== 'undefined') window.downloadTextFile = downloadTextFile;
                    window.__wqlBridgeReady = true;
                    console.log('[WQL] bridge initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Render the Leaflet station map.
///
/// Uses a polling loop to wait for the libraries to load, the bridge
/// scripts to initialize, and the container DOM element to exist.
pub fn render_station_map(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__wqlBridgeReady &&
                    typeof window.renderStationMap !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderStationMap('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[WQL] renderStationMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the time series chart for one parameter.
///
/// Uses a polling loop to wait for the libraries to load, the bridge
/// scripts to initialize, and the container DOM element to exist.
pub fn render_series_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__wqlBridgeReady &&
                    typeof window.renderSeriesChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderSeriesChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[WQL] renderSeriesChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Offer a text file for download in the browser.
///
/// Content is JSON-escaped so arbitrary CSV/HTML text survives embedding
/// into the eval'd call.
pub fn trigger_download(filename: &str, mime_type: &str, content: &str) {
    let filename_js = serde_json::to_string(filename).unwrap_or_default();
    let mime_js = serde_json::to_string(mime_type).unwrap_or_default();
    let content_js = serde_json::to_string(content).unwrap_or_default();
    call_js(&format!(
        "if (typeof window.downloadTextFile !== 'undefined') {{ window.downloadTextFile({filename_js}, {mime_js}, {content_js}); }}",
    ));
}

/// The station number of the most recently clicked map marker, if any.
///
/// Marker click handlers in station-map.js write the number to
/// `window.__wqlSelectedStation`; the app polls this from an async task.
pub fn selected_station() -> Option<u32> {
    let value = js_sys::Reflect::get(
        &js_sys::global(),
        &JsValue::from_str("__wqlSelectedStation"),
    )
    .ok()?;
    value.as_f64().map(|n| n as u32)
}

/// Reset the marker click slot.
pub fn clear_selected_station() {
    call_js("window.__wqlSelectedStation = null;");
}

/// Async sleep backed by `setTimeout`, for polling loops in spawned tasks.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
