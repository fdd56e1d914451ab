//! Measurement station (Messpunkt) reference data.

use csv::ReaderBuilder;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::columns::normalize_name;
use crate::error::{Result, WqError};
use crate::locale;

/// Marker color palette, cycled over the distinct station sources in
/// first-appearance order.
pub const MARKER_COLORS: [&str; 11] = [
    "red",
    "blue",
    "green",
    "purple",
    "orange",
    "darkred",
    "lightred",
    "darkblue",
    "darkgreen",
    "cadetblue",
    "darkpurple",
];

/// A monitoring station from `Messpunkte.csv`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Station number, also the key of the per-station measurement file.
    pub number: u32,
    pub name: String,
    /// Operator or program the station belongs to (Quelle).
    pub source: String,
    /// The lake or stream being sampled (Gewässer).
    pub water_body: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    /// Parse `Messpunkte.csv` (semicolon separated, comma decimals).
    ///
    /// Expected columns: `Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad`.
    /// Columns are located by header name, so their order does not matter.
    /// Rows without parseable coordinates are skipped with a warning; a row
    /// whose Nummer is not a number is an error naming the line.
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>> {
        let csv_object = csv_object.trim_start_matches('\u{feff}');
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());

        let headers = rdr.headers()?.clone();
        let find = |wanted: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| normalize_name(h) == normalize_name(wanted))
                .ok_or_else(|| WqError::MissingColumn(wanted.to_string()))
        };
        let idx_number = find("Nummer")?;
        let idx_name = find("Name")?;
        let idx_source = find("Quelle")?;
        let idx_water_body = find("Gewässer")?;
        let idx_latitude = find("Breitengrad")?;
        let idx_longitude = find("Längengrad")?;

        let mut stations: Vec<Station> = Vec::new();
        for (row_index, row) in rdr.records().enumerate() {
            let record = row?;
            let line = row_index + 2;
            let number_raw = record.get(idx_number).unwrap_or("").trim();
            let number = number_raw
                .parse::<u32>()
                .map_err(|_| WqError::InvalidStation {
                    line,
                    value: number_raw.to_string(),
                })?;

            let latitude = record.get(idx_latitude).and_then(locale::parse_decimal);
            let longitude = record.get(idx_longitude).and_then(locale::parse_decimal);
            let (latitude, longitude) = match (latitude, longitude) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    warn!("Skipping station {number} on line {line}: no usable coordinates");
                    continue;
                }
            };

            stations.push(Station {
                number,
                name: record.get(idx_name).unwrap_or("").trim().to_string(),
                source: record.get(idx_source).unwrap_or("").trim().to_string(),
                water_body: record.get(idx_water_body).unwrap_or("").trim().to_string(),
                latitude,
                longitude,
            });
        }
        Ok(stations)
    }
}

/// Assign a stable marker color to each distinct source, in the order the
/// sources first appear. The palette wraps when there are more sources
/// than colors.
pub fn source_colors<'a, I>(sources: I) -> Vec<(String, &'static str)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<String> = Vec::new();
    for source in sources {
        if !seen.iter().any(|s| s == source) {
            seen.push(source.to_string());
        }
    }
    seen.into_iter()
        .enumerate()
        .map(|(i, source)| (source, MARKER_COLORS[i % MARKER_COLORS.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS_CSV: &str = "\
Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad
1;Krähenteich;Hansestadt Lübeck;Krähenteich;53,8599;10,6873
2;Stadtgraben Nord;Hansestadt Lübeck;Stadtgraben;53,8721;10,6801
7;Wakenitz Moltkebrücke;Wasserverband;Wakenitz;53,8601;10,7002
";

    #[test]
    fn parses_stations_with_comma_decimals() {
        let stations = Station::parse_station_csv(STATIONS_CSV).unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].number, 1);
        assert_eq!(stations[0].name, "Krähenteich");
        assert_eq!(stations[0].water_body, "Krähenteich");
        assert!((stations[0].latitude - 53.8599).abs() < 1e-9);
        assert!((stations[2].longitude - 10.7002).abs() < 1e-9);
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "\
Name;Längengrad;Breitengrad;Gewässer;Quelle;Nummer
Krähenteich;10,6873;53,8599;Krähenteich;Stadt;1
";
        let stations = Station::parse_station_csv(csv).unwrap();
        assert_eq!(stations[0].number, 1);
        assert!((stations[0].longitude - 10.6873).abs() < 1e-9);
    }

    #[test]
    fn skips_rows_without_coordinates() {
        let csv = "\
Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad
1;A;Stadt;See;53,86;10,68
2;B;Stadt;See;;
3;C;Stadt;See;53,9;10,7
";
        let stations = Station::parse_station_csv(csv).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].number, 3);
    }

    #[test]
    fn bad_station_number_is_an_error_naming_the_line() {
        let csv = "\
Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad
1;A;Stadt;See;53,86;10,68
x;B;Stadt;See;53,87;10,69
";
        let err = Station::parse_station_csv(csv).unwrap_err();
        match err {
            WqError::InvalidStation { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Nummer;Name;Quelle;Breitengrad;Längengrad\n1;A;S;53,8;10,6\n";
        let err = Station::parse_station_csv(csv).unwrap_err();
        assert!(matches!(err, WqError::MissingColumn(ref col) if col == "Gewässer"));
    }

    #[test]
    fn source_colors_follow_first_appearance_order() {
        let colors = source_colors(["Stadt", "Verband", "Stadt", "Verein"]);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], ("Stadt".to_string(), "red"));
        assert_eq!(colors[1], ("Verband".to_string(), "blue"));
        assert_eq!(colors[2], ("Verein".to_string(), "green"));
    }

    #[test]
    fn source_colors_wrap_around_the_palette() {
        let names: Vec<String> = (0..13).map(|i| format!("Quelle {i}")).collect();
        let colors = source_colors(names.iter().map(|s| s.as_str()));
        assert_eq!(colors[11].1, MARKER_COLORS[0]);
        assert_eq!(colors[12].1, MARKER_COLORS[1]);
    }
}
