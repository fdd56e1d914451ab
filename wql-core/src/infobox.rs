//! Per-parameter explanatory texts behind `Infobox.csv`.

use csv::ReaderBuilder;
use serde::Serialize;

use crate::columns::normalize_name;
use crate::error::{Result, WqError};

/// An explanatory note for one parameter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InfoEntry {
    /// Normalized parameter name, the lookup key.
    pub parameter: String,
    pub parameter_original: String,
    pub text: String,
}

/// The parsed info table. Fetched once per session; a missing table or
/// entry only means no note is shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoTable {
    entries: Vec<InfoEntry>,
}

impl InfoTable {
    /// Parse `Infobox.csv` (`Messwert;Info`, semicolon separated).
    pub fn parse_info_csv(csv_object: &str) -> Result<Self> {
        let csv_object = csv_object.trim_start_matches('\u{feff}');
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());

        let headers = rdr.headers()?.clone();
        let position = |wanted: &str| -> Option<usize> {
            headers
                .iter()
                .position(|h| normalize_name(h) == normalize_name(wanted))
        };
        let idx_parameter =
            position("Messwert").ok_or_else(|| WqError::MissingColumn("Messwert".to_string()))?;
        let idx_info =
            position("Info").ok_or_else(|| WqError::MissingColumn("Info".to_string()))?;

        let mut entries: Vec<InfoEntry> = Vec::new();
        for row in rdr.records() {
            let record = row?;
            let original = record.get(idx_parameter).unwrap_or("").trim();
            let text = record.get(idx_info).unwrap_or("").trim();
            if original.is_empty() || text.is_empty() {
                continue;
            }
            entries.push(InfoEntry {
                parameter: normalize_name(original),
                parameter_original: original.to_string(),
                text: text.to_string(),
            });
        }
        Ok(InfoTable { entries })
    }

    /// Look up the note for a normalized parameter name.
    pub fn get(&self, normalized_name: &str) -> Option<&InfoEntry> {
        self.entries.iter().find(|e| e.parameter == normalized_name)
    }

    pub fn entries(&self) -> &[InfoEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
