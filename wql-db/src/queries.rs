//! Typed query functions over the session database.
//!
//! Everything the frontend shows comes through these methods: stations for
//! the map, parameters for the selector, windowed series for the chart and
//! the limit/info lookups for the metric boxes.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use wql_core::time_range::DateWindow;

use crate::models::{LatestValue, LimitInfo, ParameterInfo, SeriesValue, StationInfo};
use crate::{WaterDb, ISO_DATE};

impl WaterDb {
    /// All stations, ordered by number.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT number, name, source, water_body, latitude, longitude
             FROM stations ORDER BY number",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StationInfo {
                number: row.get(0)?,
                name: row.get(1)?,
                source: row.get(2)?,
                water_body: row.get(3)?,
                latitude: row.get(4)?,
                longitude: row.get(5)?,
            })
        })?;
        let stations: Vec<StationInfo> = rows.collect::<Result<_, _>>()?;
        log::info!("[WQL] query: {} stations", stations.len());
        Ok(stations)
    }

    /// Parameter columns of the loaded measurement file, in CSV column order.
    pub fn query_parameters(&self) -> anyhow::Result<Vec<ParameterInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT name, original_name, unit FROM parameters ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ParameterInfo {
                name: row.get(0)?,
                original_name: row.get(1)?,
                unit: row.get(2)?,
            })
        })?;
        let parameters: Vec<ParameterInfo> = rows.collect::<Result<_, _>>()?;
        log::info!("[WQL] query: {} parameters", parameters.len());
        Ok(parameters)
    }

    /// One parameter's readings for one station inside an inclusive window,
    /// ordered chronologically. Dates are stored ISO so plain string
    /// comparison is a correct date comparison.
    pub fn query_series(
        &self,
        station: u32,
        parameter: &str,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<SeriesValue>> {
        let start = window.start.format(ISO_DATE).to_string();
        let end = window.end.format(ISO_DATE).to_string();
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, time, value FROM measurements
             WHERE station = ?1 AND parameter = ?2 AND date >= ?3 AND date <= ?4
             ORDER BY date, time",
        )?;
        let rows = stmt.query_map(params![station, parameter, start, end], |row| {
            Ok(SeriesValue {
                date: row.get(0)?,
                time: row.get(1)?,
                value: row.get(2)?,
            })
        })?;
        let series: Vec<SeriesValue> = rows.collect::<Result<_, _>>()?;
        log::info!(
            "[WQL] query: {} series points for station {} / {}",
            series.len(),
            station,
            parameter
        );
        Ok(series)
    }

    /// The newest visit's reading of a parameter inside the window, if any.
    ///
    /// Keyed on the station's latest (date, time) across all parameters,
    /// so an empty cell at the newest visit yields `None` rather than an
    /// older reading.
    pub fn query_latest(
        &self,
        station: u32,
        parameter: &str,
        window: &DateWindow,
    ) -> anyhow::Result<Option<LatestValue>> {
        let start = window.start.format(ISO_DATE).to_string();
        let end = window.end.format(ISO_DATE).to_string();
        let conn = self.conn.borrow();
        let visit: Option<(String, String)> = conn
            .query_row(
                "SELECT date, time FROM measurements
                 WHERE station = ?1 AND date >= ?2 AND date <= ?3
                 ORDER BY date DESC, time DESC LIMIT 1",
                params![station, start, end],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((date, time)) = visit else {
            return Ok(None);
        };
        let latest = conn
            .query_row(
                "SELECT date, value FROM measurements
                 WHERE station = ?1 AND parameter = ?2 AND date = ?3 AND time = ?4",
                params![station, parameter, date, time],
                |row| {
                    Ok(LatestValue {
                        date: row.get(0)?,
                        value: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(latest)
    }

    /// The limit entry for a parameter, if one is defined.
    pub fn query_limit(&self, parameter: &str) -> anyhow::Result<Option<LimitInfo>> {
        let conn = self.conn.borrow();
        let limit = conn
            .query_row(
                "SELECT parameter, original_name, limit_value, cas, context
                 FROM limits WHERE parameter = ?1",
                params![parameter],
                |row| {
                    Ok(LimitInfo {
                        parameter: row.get(0)?,
                        original_name: row.get(1)?,
                        limit_value: row.get(2)?,
                        cas: row.get(3)?,
                        context: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(limit)
    }

    /// The explanatory text for a parameter, if one is defined.
    pub fn query_info(&self, parameter: &str) -> anyhow::Result<Option<String>> {
        let conn = self.conn.borrow();
        let info = conn
            .query_row(
                "SELECT info FROM info_boxes WHERE parameter = ?1",
                params![parameter],
                |row| row.get(0),
            )
            .optional()?;
        Ok(info)
    }

    /// First and last measurement date of a station across all parameters.
    /// `None` when the station has no readings at all.
    pub fn query_date_range(&self, station: u32) -> anyhow::Result<Option<(NaiveDate, NaiveDate)>> {
        let conn = self.conn.borrow();
        let bounds: (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM measurements WHERE station = ?1",
            params![station],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        match bounds {
            (Some(min), Some(max)) => {
                let start = NaiveDate::parse_from_str(&min, ISO_DATE)?;
                let end = NaiveDate::parse_from_str(&max, ISO_DATE)?;
                Ok(Some((start, end)))
            }
            _ => Ok(None),
        }
    }
}
