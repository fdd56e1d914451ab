//! CSV loading functions for populating the in-memory SQLite database.
//!
//! Each loader takes the raw CSV text of one published file, parses it
//! through `wql-core` and inserts the result. The parsers already handle
//! the semicolon separator, decimal commas and day-first dates, so the
//! loaders only flatten the wide measurement table into long form.

use rusqlite::params;
use wql_core::columns::unit_of;
use wql_core::infobox::InfoTable;
use wql_core::limits::LimitTable;
use wql_core::measurement::MeasurementTable;
use wql_core::station::Station;

use crate::{WaterDb, ISO_DATE};

impl WaterDb {
    /// Load station metadata from `Messpunkte.csv` text.
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let stations = Station::parse_station_csv(csv_data)?;
        let conn = self.conn.borrow();
        let mut count = 0u32;
        for s in &stations {
            conn.execute(
                "INSERT OR REPLACE INTO stations (number, name, source, water_body, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![s.number, s.name, s.source, s.water_body, s.latitude, s.longitude],
            )?;
            count += 1;
        }
        log::info!("[WQL] loader: loaded {} stations", count);
        Ok(())
    }

    /// Load one station's measurement file from CSV text.
    ///
    /// The wide table is flattened: every non-empty parameter cell becomes
    /// one `measurements` row, and the parameter columns are recorded in
    /// `parameters` with their original header, unit and column position.
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<()> {
        let table = MeasurementTable::parse_measurement_csv(csv_data)?;
        self.load_measurement_table(&table)
    }

    /// Load an already parsed measurement table.
    pub fn load_measurement_table(&self, table: &MeasurementTable) -> anyhow::Result<()> {
        let conn = self.conn.borrow();

        for (position, name) in table.parameters().iter().enumerate() {
            let original = table.columns().original(name).unwrap_or(name);
            let unit = unit_of(original);
            conn.execute(
                "INSERT OR REPLACE INTO parameters (name, original_name, unit, position)
                 VALUES (?1, ?2, ?3, ?4)",
                params![name, original, unit, position as i64],
            )?;
        }

        let mut count = 0u32;
        let mut skipped = 0u32;
        for row in table.rows() {
            let date = row.date.format(ISO_DATE).to_string();
            let time = row.time.clone().unwrap_or_default();
            for (index, name) in table.parameters().iter().enumerate() {
                match row.values.get(index).copied().flatten() {
                    Some(value) => {
                        conn.execute(
                            "INSERT OR REPLACE INTO measurements (station, date, time, parameter, value)
                             VALUES (?1, ?2, ?3, ?4, ?5)",
                            params![row.station, date, time, name, value],
                        )?;
                        count += 1;
                    }
                    None => skipped += 1,
                }
            }
        }
        log::info!(
            "[WQL] loader: loaded {} measurement values, skipped {} empty cells",
            count,
            skipped
        );
        Ok(())
    }

    /// Load the limit table from `Grenzwerte.csv` text.
    pub fn load_limits(&self, csv_data: &str) -> anyhow::Result<()> {
        let limits = LimitTable::parse_limit_csv(csv_data)?;
        let conn = self.conn.borrow();
        let mut count = 0u32;
        for entry in limits.entries() {
            conn.execute(
                "INSERT OR IGNORE INTO limits (parameter, original_name, limit_value, cas, context)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    entry.parameter,
                    entry.parameter_original,
                    entry.limit,
                    entry.cas,
                    entry.context
                ],
            )?;
            count += 1;
        }
        log::info!("[WQL] loader: loaded {} limits", count);
        Ok(())
    }

    /// Load the per-parameter info texts from `Infobox.csv` text.
    pub fn load_info_boxes(&self, csv_data: &str) -> anyhow::Result<()> {
        let info = InfoTable::parse_info_csv(csv_data)?;
        let conn = self.conn.borrow();
        let mut count = 0u32;
        for entry in info.entries() {
            conn.execute(
                "INSERT OR IGNORE INTO info_boxes (parameter, original_name, info)
                 VALUES (?1, ?2, ?3)",
                params![entry.parameter, entry.parameter_original, entry.text],
            )?;
            count += 1;
        }
        log::info!("[WQL] loader: loaded {} info texts", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::WaterDb;

    const STATIONS_CSV: &str = "\
Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad
1;Krähenteich;Hansestadt Lübeck;Krähenteich;53,8599;10,6873
2;Stadtgraben Nord;Hansestadt Lübeck;Stadtgraben;53,8721;10,6801
";

    const MEASUREMENTS_CSV: &str = "\
Nummer;Name;Tag;Uhrzeit;Nitrat [mg/l];pH
1;Krähenteich;02.05.2024;09:15;12,3;7,8
1;Krähenteich;16.05.2024;09:30;12,96;
1;Krähenteich;30.05.2024;;13,1;8,0
";

    #[test]
    fn load_stations_from_csv() {
        let db = WaterDb::new().unwrap();
        db.load_stations(STATIONS_CSV).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM stations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let name: String = conn
            .query_row("SELECT name FROM stations WHERE number = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(name, "Krähenteich");

        let lat: f64 = conn
            .query_row(
                "SELECT latitude FROM stations WHERE number = 2",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((lat - 53.8721).abs() < 1e-9);
    }

    #[test]
    fn load_stations_replaces_on_conflict() {
        let db = WaterDb::new().unwrap();
        db.load_stations(STATIONS_CSV).unwrap();
        db.load_stations(
            "Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad\n1;Umbenannt;Stadt;Krähenteich;53,86;10,69\n",
        )
        .unwrap();

        let conn = db.conn.borrow();
        let name: String = conn
            .query_row("SELECT name FROM stations WHERE number = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(name, "Umbenannt");
    }

    #[test]
    fn load_measurements_flattens_to_long_form() {
        let db = WaterDb::new().unwrap();
        db.load_measurements(MEASUREMENTS_CSV).unwrap();

        let conn = db.conn.borrow();
        // 3 nitrate readings + 2 pH readings; the empty pH cell is skipped
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 5);

        let value: f64 = conn
            .query_row(
                "SELECT value FROM measurements
                 WHERE station = 1 AND date = '2024-05-02' AND parameter = 'Nitrat_mg_l'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((value - 12.3).abs() < 1e-9);
    }

    #[test]
    fn load_measurements_stores_iso_dates() {
        let db = WaterDb::new().unwrap();
        db.load_measurements(MEASUREMENTS_CSV).unwrap();

        let conn = db.conn.borrow();
        let dates: i64 = conn
            .query_row(
                "SELECT COUNT(DISTINCT date) FROM measurements WHERE date LIKE '2024-05-%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(dates, 3);
    }

    #[test]
    fn load_measurements_records_parameter_metadata() {
        let db = WaterDb::new().unwrap();
        db.load_measurements(MEASUREMENTS_CSV).unwrap();

        let conn = db.conn.borrow();
        let (original, unit): (String, Option<String>) = conn
            .query_row(
                "SELECT original_name, unit FROM parameters WHERE name = 'Nitrat_mg_l'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(original, "Nitrat [mg/l]");
        assert_eq!(unit.as_deref(), Some("mg/l"));

        let ph_unit: Option<String> = conn
            .query_row("SELECT unit FROM parameters WHERE name = 'pH'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(ph_unit, None);
    }

    #[test]
    fn sessions_are_isolated_per_database() {
        let first = WaterDb::new().unwrap();
        first.load_measurements(MEASUREMENTS_CSV).unwrap();

        let second = WaterDb::new().unwrap();
        second
            .load_measurements(
                "Nummer;Name;Tag;Uhrzeit;Leitfähigkeit [µS/cm]\n2;Stadtgraben Nord;01.07.2024;08:00;412,0\n",
            )
            .unwrap();

        // Loading a second session must not leak into the first; dropping
        // a session discards its data with it.
        let names: Vec<String> = first
            .query_parameters()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Nitrat_mg_l", "pH"]);

        let conn = first.conn.borrow();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM measurements WHERE station = 2",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn load_limits_first_row_wins_on_duplicates() {
        let db = WaterDb::new().unwrap();
        db.load_limits("Messwert;Grenzwert\nNitrat [mg/l];13\nNitrat [mg/l];99\n")
            .unwrap();

        let conn = db.conn.borrow();
        let limit: f64 = conn
            .query_row(
                "SELECT limit_value FROM limits WHERE parameter = 'Nitrat_mg_l'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((limit - 13.0).abs() < 1e-9);
    }

    #[test]
    fn load_info_boxes_from_csv() {
        let db = WaterDb::new().unwrap();
        db.load_info_boxes("Messwert;Info\npH;Der pH-Wert beschreibt den Säuregrad.\n")
            .unwrap();

        let conn = db.conn.borrow();
        let info: String = conn
            .query_row(
                "SELECT info FROM info_boxes WHERE parameter = 'pH'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(info.starts_with("Der pH-Wert"));
    }
}
