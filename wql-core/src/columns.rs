//! Column header normalization for the measurement tables.
//!
//! The published CSVs carry German headers with umlauts, units in square
//! brackets and the occasional slash ("Sauerstoffsättigung [%]",
//! "Nitrat [mg/l]"). Those are awkward as identifiers, so every header is
//! normalized once on load and the table keeps the reverse mapping so
//! selectors and exports can show the original spelling.

use std::collections::HashMap;

/// Normalize a column header into an underscore-safe ASCII token.
///
/// Umlauts and `ß` are transliterated, `°`/`µ`/`%` get spelled-out
/// replacements, and brackets, parentheses, slashes, commas and interior
/// whitespace become underscores. Runs of underscores are collapsed and
/// stripped from both ends. The function is idempotent.
pub fn normalize_name(original: &str) -> String {
    let mut raw = String::with_capacity(original.len());
    for ch in original.trim().chars() {
        match ch {
            'ä' => raw.push_str("ae"),
            'ö' => raw.push_str("oe"),
            'ü' => raw.push_str("ue"),
            'Ä' => raw.push_str("Ae"),
            'Ö' => raw.push_str("Oe"),
            'Ü' => raw.push_str("Ue"),
            'ß' => raw.push_str("ss"),
            '°' => raw.push_str("deg"),
            'µ' => raw.push('u'),
            '%' => raw.push_str("proz"),
            '[' | ']' | '(' | ')' | '/' | ',' => raw.push('_'),
            c if c.is_whitespace() => raw.push('_'),
            c => raw.push(c),
        }
    }

    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = true;
    for ch in raw.chars() {
        if ch == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(ch);
            prev_underscore = false;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Extract the measurement unit from a column header.
///
/// The bracket convention wins ("Nitrat [mg/l]" yields "mg/l"); headers
/// without brackets fall back to the trailing underscore segment of the
/// normalized name ("Leitfaehigkeit_uS" yields "uS"). Headers with
/// neither convention have no unit.
pub fn unit_of(original: &str) -> Option<String> {
    if let (Some(open), Some(close)) = (original.find('['), original.rfind(']')) {
        if open < close {
            let unit = original[open + 1..close].trim();
            if !unit.is_empty() {
                return Some(unit.to_string());
            }
        }
    }
    let normalized = normalize_name(original);
    let mut parts = normalized.rsplitn(2, '_');
    let tail = parts.next()?;
    parts.next()?;
    if tail.is_empty() {
        None
    } else {
        Some(tail.to_string())
    }
}

/// Ordered mapping between original and normalized column names.
///
/// Two originals can normalize to the same token ("Nitrat [mg/l]" and
/// "Nitrat (mg/l)"); later duplicates get a numeric suffix so the reverse
/// lookup stays exact and no column silently shadows another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    normalized: Vec<String>,
    originals: HashMap<String, String>,
}

impl ColumnMap {
    /// Build a map from header cells in their CSV order.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = ColumnMap::default();
        for header in headers {
            map.insert(header.as_ref());
        }
        map
    }

    fn insert(&mut self, original: &str) {
        let base = normalize_name(original);
        let mut name = base.clone();
        let mut suffix = 2usize;
        while self.originals.contains_key(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.originals
            .insert(name.clone(), original.trim().to_string());
        self.normalized.push(name);
    }

    /// Normalized names in CSV column order.
    pub fn names(&self) -> &[String] {
        &self.normalized
    }

    /// Exact original header for a normalized name.
    pub fn original(&self, normalized: &str) -> Option<&str> {
        self.originals.get(normalized).map(|s| s.as_str())
    }

    /// Position of a normalized name in CSV column order.
    pub fn index_of(&self, normalized: &str) -> Option<usize> {
        self.normalized.iter().position(|n| n == normalized)
    }

    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_umlauts_and_units() {
        assert_eq!(normalize_name("Sauerstoffsättigung [%]"), "Sauerstoffsaettigung_proz");
        assert_eq!(normalize_name("Nitrat [mg/l]"), "Nitrat_mg_l");
        assert_eq!(normalize_name("Temperatur [°C]"), "Temperatur_degC");
        assert_eq!(normalize_name("Gewässer"), "Gewaesser");
        assert_eq!(normalize_name("  pH  "), "pH");
    }

    #[test]
    fn normalization_is_idempotent() {
        for header in [
            "Sauerstoffsättigung [%]",
            "Nitrat [mg/l]",
            "Temperatur [°C]",
            "Leitfähigkeit [µS/cm]",
            "pH",
            "schon_normalisiert",
        ] {
            let once = normalize_name(header);
            assert_eq!(normalize_name(&once), once, "not idempotent for {header}");
        }
    }

    #[test]
    fn underscore_runs_collapse_and_trim() {
        assert_eq!(normalize_name("a  [b]  "), "a_b");
        assert_eq!(normalize_name("[x]"), "x");
        assert_eq!(normalize_name("a__b"), "a_b");
    }

    #[test]
    fn unit_prefers_brackets_over_suffix() {
        assert_eq!(unit_of("Nitrat [mg/l]"), Some("mg/l".to_string()));
        assert_eq!(unit_of("Sauerstoffsättigung [%]"), Some("%".to_string()));
        assert_eq!(unit_of("Leitfaehigkeit_uS"), Some("uS".to_string()));
        assert_eq!(unit_of("pH"), None);
    }

    #[test]
    fn column_map_round_trips_originals() {
        let map = ColumnMap::from_headers(["Nitrat [mg/l]", "Sauerstoffsättigung [%]", "pH"]);
        assert_eq!(
            map.names(),
            ["Nitrat_mg_l", "Sauerstoffsaettigung_proz", "pH"]
        );
        assert_eq!(map.original("Nitrat_mg_l"), Some("Nitrat [mg/l]"));
        assert_eq!(
            map.original("Sauerstoffsaettigung_proz"),
            Some("Sauerstoffsättigung [%]")
        );
        assert_eq!(map.original("pH"), Some("pH"));
        assert_eq!(map.original("fehlt"), None);
    }

    #[test]
    fn colliding_headers_get_numeric_suffixes() {
        // Both headers normalize to "Nitrat_mg_l"; the reverse lookup must
        // keep them apart instead of overwriting one with the other.
        let map = ColumnMap::from_headers(["Nitrat [mg/l]", "Nitrat (mg/l)", "Nitrat mg l"]);
        assert_eq!(map.names(), ["Nitrat_mg_l", "Nitrat_mg_l_2", "Nitrat_mg_l_3"]);
        assert_eq!(map.original("Nitrat_mg_l"), Some("Nitrat [mg/l]"));
        assert_eq!(map.original("Nitrat_mg_l_2"), Some("Nitrat (mg/l)"));
        assert_eq!(map.original("Nitrat_mg_l_3"), Some("Nitrat mg l"));
    }

    #[test]
    fn normalized_names_are_unique() {
        let map = ColumnMap::from_headers(["a b", "a_b", "a  b"]);
        let mut names = map.names().to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }
}
