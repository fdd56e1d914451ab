//! SQL schema definitions for the in-memory SQLite database.
//!
//! Contains CREATE TABLE statements for all session tables. The schema is
//! applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `stations` - Station metadata (number, name, source, water body, lat/lon)
/// - `parameters` - Parameter metadata (normalized name, original header,
///   unit, CSV column position)
/// - `measurements` - Long-form readings (station, ISO date, time,
///   parameter, value); missing time is stored as the empty string so it
///   can take part in the primary key
/// - `limits` - Regulatory limits keyed by normalized parameter name
/// - `info_boxes` - Per-parameter explanatory texts
///
/// Dates are stored as `YYYY-MM-DD` text so `>=`/`<=` string comparison
/// implements the inclusive date window directly in SQL.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS stations (
        number INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        source TEXT NOT NULL,
        water_body TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS parameters (
        name TEXT PRIMARY KEY,
        original_name TEXT NOT NULL,
        unit TEXT,
        position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS measurements (
        station INTEGER NOT NULL,
        date TEXT NOT NULL,
        time TEXT NOT NULL DEFAULT '',
        parameter TEXT NOT NULL,
        value REAL NOT NULL,
        PRIMARY KEY (station, date, time, parameter)
    );
    CREATE INDEX IF NOT EXISTS idx_meas_station ON measurements(station);
    CREATE INDEX IF NOT EXISTS idx_meas_date ON measurements(date);
    CREATE INDEX IF NOT EXISTS idx_meas_parameter ON measurements(parameter);

    CREATE TABLE IF NOT EXISTS limits (
        parameter TEXT PRIMARY KEY,
        original_name TEXT NOT NULL,
        limit_value REAL NOT NULL,
        cas TEXT,
        context TEXT
    );

    CREATE TABLE IF NOT EXISTS info_boxes (
        parameter TEXT PRIMARY KEY,
        original_name TEXT NOT NULL,
        info TEXT NOT NULL
    );

    "#
}
