//! The wide measurement table behind `Messwerte/{nummer}_Messwerte.csv`.
//!
//! Each station file carries a handful of metadata columns (Nummer, Name,
//! Tag, Uhrzeit, Bemerkung) followed by an open-ended set of parameter
//! columns that differ from station to station. Parameter headers are
//! normalized on load and every parameter cell is coerced to a number;
//! cells that do not read as numbers are missing values, not errors.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::warn;
use serde::Serialize;

use crate::columns::{normalize_name, ColumnMap};
use crate::error::{Result, WqError};
use crate::locale;
use crate::time_range::DateWindow;

/// Day-first date formats accepted in the Tag column, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%d.%m.%Y", "%d-%m-%Y", "%d.%m.%y", "%d-%m-%y"];

/// Columns that are never measurement parameters, by original spelling.
/// Matching happens on the normalized form, so umlaut variants also hit.
pub const METADATA_COLUMNS: [&str; 9] = [
    "Nummer",
    "Name",
    "Tag",
    "Uhrzeit",
    "Bemerkung",
    "Quelle",
    "Gewässer",
    "Breitengrad",
    "Längengrad",
];

/// One sampling visit: the metadata cells plus the parameter readings in
/// table column order (`values` is parallel to the table's parameters).
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub station: u32,
    pub station_name: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub remark: Option<String>,
    pub values: Vec<Option<f64>>,
}

/// A point of one parameter's series, carrying only rows with a reading.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub time: Option<String>,
    pub value: f64,
}

/// A parsed measurement table, rows sorted by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    columns: ColumnMap,
    rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    /// Parse a per-station measurement CSV (semicolon separated, comma
    /// decimals, day-first dates).
    ///
    /// Rows with an unparsable station number or date are dropped with a
    /// warning, mirroring how the tables are curated upstream.
    pub fn parse_measurement_csv(csv_object: &str) -> Result<Self> {
        let csv_object = csv_object.trim_start_matches('\u{feff}');
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());

        let headers = rdr.headers()?.clone();
        let metadata: Vec<String> = METADATA_COLUMNS.iter().map(|c| normalize_name(c)).collect();

        let mut idx_number = None;
        let mut idx_name = None;
        let mut idx_date = None;
        let mut idx_time = None;
        let mut idx_remark = None;
        let mut param_indices: Vec<usize> = Vec::new();
        let mut param_headers: Vec<&str> = Vec::new();

        for (i, header) in headers.iter().enumerate() {
            let normalized = normalize_name(header);
            match normalized.as_str() {
                "Nummer" => idx_number = Some(i),
                "Name" => idx_name = Some(i),
                "Tag" => idx_date = Some(i),
                "Uhrzeit" => idx_time = Some(i),
                "Bemerkung" => idx_remark = Some(i),
                _ if metadata.contains(&normalized) => {}
                _ => {
                    param_indices.push(i);
                    param_headers.push(header);
                }
            }
        }

        let idx_number =
            idx_number.ok_or_else(|| WqError::MissingColumn("Nummer".to_string()))?;
        let idx_date = idx_date.ok_or_else(|| WqError::MissingColumn("Tag".to_string()))?;
        let columns = ColumnMap::from_headers(param_headers);

        let mut rows: Vec<MeasurementRow> = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            let number = match record
                .get(idx_number)
                .and_then(|s| s.trim().parse::<u32>().ok())
            {
                Some(n) => n,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let date = match record.get(idx_date).and_then(parse_day_first) {
                Some(d) => d,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let cell = |idx: Option<usize>| -> Option<String> {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };

            let values = param_indices
                .iter()
                .map(|&i| record.get(i).and_then(locale::parse_decimal))
                .collect();

            rows.push(MeasurementRow {
                station: number,
                station_name: cell(idx_name).unwrap_or_default(),
                date,
                time: cell(idx_time),
                remark: cell(idx_remark),
                values,
            });
        }
        if skipped > 0 {
            warn!("Dropped {skipped} measurement rows without a valid number or date");
        }

        rows.sort_by_key(|r| r.date);
        Ok(MeasurementTable { columns, rows })
    }

    /// The parameter columns, normalized, in CSV order.
    pub fn parameters(&self) -> &[String] {
        self.columns.names()
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the rows of one station, preserving date order.
    pub fn for_station(&self, number: u32) -> MeasurementTable {
        MeasurementTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r.station == number)
                .cloned()
                .collect(),
        }
    }

    /// Keep only the rows inside the window, both endpoints included.
    /// An empty result is a valid table, not an error.
    pub fn filter_window(&self, window: &DateWindow) -> MeasurementTable {
        MeasurementTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| window.contains(r.date))
                .cloned()
                .collect(),
        }
    }

    /// The (date, time, value) series of one parameter, skipping rows
    /// without a reading. Unknown parameters yield an empty series.
    pub fn series(&self, parameter: &str) -> Vec<SeriesPoint> {
        let Some(index) = self.columns.index_of(parameter) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| {
                r.values.get(index).copied().flatten().map(|value| SeriesPoint {
                    date: r.date,
                    time: r.time.clone(),
                    value,
                })
            })
            .collect()
    }

    /// The newest visit's reading of one parameter, by date order. `None`
    /// when the table is empty or the last row's cell for the parameter is
    /// empty; an older reading never stands in for the newest visit.
    pub fn latest_value(&self, parameter: &str) -> Option<(NaiveDate, f64)> {
        let index = self.columns.index_of(parameter)?;
        let row = self.rows.last()?;
        let value = row.values.get(index).copied().flatten()?;
        Some((row.date, value))
    }

    /// First and last date of the table, if any rows exist.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

/// Parse a Tag cell with the accepted day-first formats.
fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
