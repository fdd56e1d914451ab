//! Download artifacts: CSV re-export and a self-contained chart document.
//!
//! Exports reproduce the published file conventions, original column
//! headers, day-first dates and decimal commas, so a downloaded window
//! looks exactly like a slice of the source file.

use csv::WriterBuilder;
use serde_json::{json, Value};

use crate::error::{Result, WqError};
use crate::locale;
use crate::measurement::MeasurementTable;

/// Day-first date format used in the exported Tag column.
pub const EXPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Render a measurement table back into its CSV form.
///
/// The header row restores the original parameter spellings through the
/// table's reverse column mapping. A Bemerkung column is emitted only
/// when at least one row carries a remark.
pub fn measurement_csv(table: &MeasurementTable) -> Result<String> {
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());

    let with_remark = table.rows().iter().any(|r| r.remark.is_some());
    let mut header: Vec<String> = vec![
        "Nummer".to_string(),
        "Name".to_string(),
        "Tag".to_string(),
        "Uhrzeit".to_string(),
    ];
    for name in table.parameters() {
        header.push(table.columns().original(name).unwrap_or(name).to_string());
    }
    if with_remark {
        header.push("Bemerkung".to_string());
    }
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record: Vec<String> = vec![
            row.station.to_string(),
            row.station_name.clone(),
            row.date.format(EXPORT_DATE_FORMAT).to_string(),
            row.time.clone().unwrap_or_default(),
        ];
        for value in &row.values {
            record.push(match value {
                Some(v) => locale::format_decimal(*v, 6),
                None => String::new(),
            });
        }
        if with_remark {
            record.push(row.remark.clone().unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| WqError::InvalidFormat(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| WqError::InvalidFormat(e.to_string()))
}

/// Build a Vega-Lite line spec for one parameter series, with an optional
/// dashed limit rule. `values` pairs ISO dates with readings.
pub fn vega_spec(
    title: &str,
    parameter_label: &str,
    values: &[(String, f64)],
    limit: Option<f64>,
) -> Value {
    let data: Vec<Value> = values
        .iter()
        .map(|(date, value)| json!({ "Tag": date, "Wert": value }))
        .collect();

    let mut layers = vec![json!({
        "mark": { "type": "line", "point": true, "color": "#2196F3" },
        "encoding": {
            "x": { "field": "Tag", "type": "temporal", "title": "Tag" },
            "y": {
                "field": "Wert",
                "type": "quantitative",
                "title": parameter_label,
                "scale": { "zero": false }
            }
        }
    })];
    if let Some(limit) = limit {
        layers.push(json!({
            "mark": { "type": "rule", "color": "#C62828", "strokeDash": [6, 4] },
            "encoding": { "y": { "datum": limit } }
        }));
    }

    json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "title": title,
        "width": 700,
        "height": 400,
        "data": { "values": data },
        "layer": layers
    })
}

/// Wrap a Vega-Lite spec into a self-contained HTML document that renders
/// offline except for the CDN loader scripts.
pub fn chart_html(title: &str, spec: &Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
<script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
</head>
<body>
<div id="vis"></div>
<script>
  vegaEmbed('#vis', {spec}).catch(console.error);
</script>
</body>
</html>
"#,
        title = html_escape(title),
        spec = spec,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeasurementTable;

    const MEASUREMENTS_CSV: &str = "\
Nummer;Name;Tag;Uhrzeit;Nitrat [mg/l];pH;Sauerstoffsättigung [%];Bemerkung
1;Krähenteich;02.05.2024;09:15;12,3;7,8;95,2;
1;Krähenteich;16.05.2024;09:30;12,96;7,9;;trüb
";

    #[test]
    fn export_restores_original_headers() {
        let table = MeasurementTable::parse_measurement_csv(MEASUREMENTS_CSV).unwrap();
        let out = measurement_csv(&table).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "Nummer;Name;Tag;Uhrzeit;Nitrat [mg/l];pH;Sauerstoffsättigung [%];Bemerkung"
        );
    }

    #[test]
    fn export_keeps_day_first_dates_and_decimal_commas() {
        let table = MeasurementTable::parse_measurement_csv(MEASUREMENTS_CSV).unwrap();
        let out = measurement_csv(&table).unwrap();
        assert!(out.contains("02.05.2024"));
        assert!(out.contains("12,3"));
        assert!(out.contains("12,96"));
        assert!(out.contains("trüb"));
    }

    #[test]
    fn export_leaves_missing_readings_empty() {
        let table = MeasurementTable::parse_measurement_csv(MEASUREMENTS_CSV).unwrap();
        let out = measurement_csv(&table).unwrap();
        let second_row = out.lines().nth(2).unwrap();
        // the oxygen cell of the second visit is empty
        assert!(second_row.contains(";7,9;;"));
    }

    #[test]
    fn export_omits_remark_column_when_unused() {
        let csv = "Nummer;Name;Tag;Uhrzeit;pH\n1;A;02.05.2024;;7,8\n";
        let table = MeasurementTable::parse_measurement_csv(csv).unwrap();
        let out = measurement_csv(&table).unwrap();
        assert_eq!(out.lines().next().unwrap(), "Nummer;Name;Tag;Uhrzeit;pH");
    }

    #[test]
    fn vega_spec_adds_a_rule_layer_for_the_limit() {
        let values = vec![("2024-05-02".to_string(), 12.3)];
        let with_limit = vega_spec("Nitrat", "Nitrat [mg/l]", &values, Some(13.0));
        assert_eq!(with_limit["layer"].as_array().unwrap().len(), 2);
        assert_eq!(with_limit["layer"][1]["encoding"]["y"]["datum"], 13.0);

        let without_limit = vega_spec("Nitrat", "Nitrat [mg/l]", &values, None);
        assert_eq!(without_limit["layer"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn chart_html_embeds_the_spec() {
        let spec = vega_spec("Nitrat", "Nitrat [mg/l]", &[], None);
        let html = chart_html("Nitrat im Krähenteich", &spec);
        assert!(html.contains("<title>Nitrat im Krähenteich</title>"));
        assert!(html.contains("vegaEmbed"));
        assert!(html.contains("vega-lite/v5.json"));
    }

    #[test]
    fn chart_html_escapes_the_title() {
        let spec = vega_spec("t", "t", &[], None);
        let html = chart_html("a < b & c", &spec);
        assert!(html.contains("<title>a &lt; b &amp; c</title>"));
    }
}
