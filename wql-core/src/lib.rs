//! Core data handling for the Lübeck water quality dashboard: CSV decoding
//! for the published Messpunkte/Messwerte/Grenzwerte/Infobox tables, header
//! normalization, date-window filtering and limit classification.

pub mod columns;
pub mod error;
pub mod export;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod infobox;
pub mod limits;
pub mod locale;
pub mod measurement;
pub mod station;
pub mod status;
pub mod time_range;

pub use error::{Result, WqError};
