//! In-memory SQLite session store for Lübeck water quality data.
//!
//! The dashboard fetches the published CSV files at runtime and loads them
//! into an in-memory SQLite database that lives for one browser session.
//! This crate provides that store and exposes typed query methods for
//! consumption by the Dioxus/Leaflet/D3 frontend.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in
//!   single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to `wasm32-unknown-unknown`)
//! - CSV text parsed by `wql-core`, then stored long-form: one row per
//!   (station, date, time, parameter) reading
//! - Typed query methods returning serializable structs for JSON export to
//!   the map and chart scripts
//!
//! # Usage
//!
//! ```rust
//! use wql_db::WaterDb;
//!
//! let db = WaterDb::new().unwrap();
//! db.load_stations("Nummer;Name;Quelle;Gewässer;Breitengrad;Längengrad\n1;Krähenteich;Stadt;Krähenteich;53,86;10,69\n").unwrap();
//! let stations = db.query_stations().unwrap();
//! assert_eq!(stations.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema: `stations`,
//! `parameters`, `measurements`, `limits` and `info_boxes`. Dates are
//! stored ISO (`YYYY-MM-DD`) so string comparison gives correct inclusive
//! date-window scans.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// ISO storage format for the date column.
pub(crate) const ISO_DATE: &str = "%Y-%m-%d";

/// In-memory SQLite database holding one dashboard session's data.
///
/// Cheaply cloneable (via `Rc`) and suitable for sharing across Dioxus
/// components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct WaterDb {
    conn: Rc<RefCell<Connection>>,
}

impl WaterDb {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods to
    /// populate it with CSV text.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
