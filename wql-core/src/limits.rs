//! The regulatory limit table behind `Grenzwerte.csv`.

use csv::ReaderBuilder;
use log::warn;
use serde::Serialize;

use crate::columns::normalize_name;
use crate::error::{Result, WqError};
use crate::locale;

/// One limit row: the parameter it applies to, the threshold and optional
/// registry and context notes.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LimitEntry {
    /// Normalized parameter name, the lookup key.
    pub parameter: String,
    /// The Messwert cell as published.
    pub parameter_original: String,
    pub limit: f64,
    /// CAS registry number, where the parameter is a chemical.
    pub cas: Option<String>,
    pub context: Option<String>,
}

/// The parsed limit table. A parameter without an entry simply has no
/// limit; that is informational, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimitTable {
    entries: Vec<LimitEntry>,
}

impl LimitTable {
    /// Parse `Grenzwerte.csv` (semicolon separated, comma decimals).
    ///
    /// Expected columns: `Messwert;Grenzwert` plus optional `CAS-Nr` and
    /// `Kontext`. Rows whose Grenzwert does not read as a number are
    /// dropped with a warning.
    pub fn parse_limit_csv(csv_object: &str) -> Result<Self> {
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
        let idx_limit =
            position("Grenzwert").ok_or_else(|| WqError::MissingColumn("Grenzwert".to_string()))?;
        let idx_cas = position("CAS-Nr");
        let idx_context = position("Kontext");

        let mut entries: Vec<LimitEntry> = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            let original = record.get(idx_parameter).unwrap_or("").trim();
            if original.is_empty() {
                skipped += 1;
                continue;
            }
            let limit = match record.get(idx_limit).and_then(locale::parse_decimal) {
                Some(v) => v,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let optional = |idx: Option<usize>| -> Option<String> {
                idx.and_then(|i| record.get(i))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };
            entries.push(LimitEntry {
                parameter: normalize_name(original),
                parameter_original: original.to_string(),
                limit,
                cas: optional(idx_cas),
                context: optional(idx_context),
            });
        }
        if skipped > 0 {
            warn!("Dropped {skipped} limit rows without a usable Messwert or Grenzwert");
        }
        Ok(LimitTable { entries })
    }

    /// Look up a limit by normalized parameter name. With duplicate rows
    /// the first one wins.
    pub fn get(&self, normalized_name: &str) -> Option<&LimitEntry> {
        self.entries.iter().find(|e| e.parameter == normalized_name)
    }

    pub fn entries(&self) -> &[LimitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS_CSV: &str = "\
Messwert;Grenzwert;CAS-Nr;Kontext
Nitrat [mg/l];13;14797-55-8;Trinkwasserverordnung
Sauerstoffsättigung [%];80;;Badegewässer
pH;9;;
";

    #[test]
    fn parses_limits_and_normalizes_keys() {
        let limits = LimitTable::parse_limit_csv(LIMITS_CSV).unwrap();
        assert_eq!(limits.len(), 3);
        let nitrate = limits.get("Nitrat_mg_l").unwrap();
        assert_eq!(nitrate.limit, 13.0);
        assert_eq!(nitrate.parameter_original, "Nitrat [mg/l]");
        assert_eq!(nitrate.cas.as_deref(), Some("14797-55-8"));
        assert_eq!(nitrate.context.as_deref(), Some("Trinkwasserverordnung"));
    }

    #[test]
    fn empty_optional_cells_are_none() {
        let limits = LimitTable::parse_limit_csv(LIMITS_CSV).unwrap();
        let ph = limits.get("pH").unwrap();
        assert_eq!(ph.cas, None);
        assert_eq!(ph.context, None);
    }

    #[test]
    fn missing_limit_is_informational() {
        let limits = LimitTable::parse_limit_csv(LIMITS_CSV).unwrap();
        assert!(limits.get("Phosphat_mg_l").is_none());
    }

    #[test]
    fn comma_decimal_limits_parse() {
        let csv = "Messwert;Grenzwert\nAmmonium [mg/l];0,5\n";
        let limits = LimitTable::parse_limit_csv(csv).unwrap();
        assert_eq!(limits.get("Ammonium_mg_l").unwrap().limit, 0.5);
    }

    #[test]
    fn rows_without_a_numeric_limit_are_dropped() {
        let csv = "\
Messwert;Grenzwert
Nitrat [mg/l];13
Chlorid [mg/l];siehe Anlage
";
        let limits = LimitTable::parse_limit_csv(csv).unwrap();
        assert_eq!(limits.len(), 1);
    }

    #[test]
    fn first_duplicate_wins() {
        let csv = "\
Messwert;Grenzwert
Nitrat [mg/l];13
Nitrat [mg/l];99
";
        let limits = LimitTable::parse_limit_csv(csv).unwrap();
        assert_eq!(limits.get("Nitrat_mg_l").unwrap().limit, 13.0);
    }

    #[test]
    fn missing_messwert_column_is_an_error() {
        let err = LimitTable::parse_limit_csv("Stoff;Wert\nNitrat;13\n").unwrap_err();
        assert!(matches!(err, WqError::MissingColumn(ref col) if col == "Messwert"));
    }
}
