//! HTTP loaders for the published CSV endpoints.
//!
//! All four tables live as plain files under one raw-content base URL.
//! The client memoizes response bodies per URL for its lifetime, so the
//! shared tables (Grenzwerte, Infobox) and a re-selected station are
//! fetched once per session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{info, warn};
use reqwest::{Client, StatusCode};

use crate::error::{Result, WqError};
use crate::infobox::InfoTable;
use crate::limits::LimitTable;
use crate::measurement::MeasurementTable;
use crate::station::Station;

/// Published base URL of the measurement repository.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/Bricketjosh/H2OHL/main";

const MAX_TRIES: u32 = 3;

/// Cheaply cloneable fetch client with a per-URL response cache.
///
/// Clones share the cache, which suits the single-threaded dashboard:
/// components hand the client around freely and repeat requests are
/// answered from memory.
#[derive(Clone)]
pub struct DataClient {
    http: Client,
    base_url: String,
    cache: Rc<RefCell<HashMap<String, String>>>,
}

impl DataClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different base URL (used by tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Raw `Messpunkte.csv` body.
    pub async fn stations_csv(&self) -> Result<String> {
        self.fetch_csv("Messpunkte.csv").await
    }

    /// Raw per-station `Messwerte` body.
    pub async fn measurements_csv(&self, station: u32) -> Result<String> {
        self.fetch_csv(&format!("Messwerte/{station}_Messwerte.csv"))
            .await
    }

    /// Raw `Grenzwerte.csv` body.
    pub async fn limits_csv(&self) -> Result<String> {
        self.fetch_csv("Grenzwerte.csv").await
    }

    /// Raw `Infobox.csv` body.
    pub async fn info_boxes_csv(&self) -> Result<String> {
        self.fetch_csv("Infobox.csv").await
    }

    /// Fetch and parse the station list.
    pub async fn stations(&self) -> Result<Vec<Station>> {
        let body = self.stations_csv().await?;
        Station::parse_station_csv(&body)
    }

    /// Fetch and parse one station's measurement table.
    pub async fn measurements(&self, station: u32) -> Result<MeasurementTable> {
        let body = self.measurements_csv(station).await?;
        MeasurementTable::parse_measurement_csv(&body)
    }

    /// Fetch and parse the limit table.
    pub async fn limits(&self) -> Result<LimitTable> {
        let body = self.limits_csv().await?;
        LimitTable::parse_limit_csv(&body)
    }

    /// Fetch and parse the info texts.
    pub async fn info_boxes(&self) -> Result<InfoTable> {
        let body = self.info_boxes_csv().await?;
        InfoTable::parse_info_csv(&body)
    }

    /// Fetch one CSV resource with retry and exponential backoff, serving
    /// repeat requests from the session cache. Backoff sleeps only on
    /// native targets; in the browser the retries run back to back.
    async fn fetch_csv(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        if let Some(hit) = self.cache.borrow().get(&url) {
            return Ok(hit.clone());
        }

        let mut sleep_millis: u64 = 1000;
        let mut last_error: Option<WqError> = None;
        for attempt in 1..=MAX_TRIES {
            match self.http.get(&url).send().await {
                Ok(response) => {
                    if response.status() != StatusCode::OK {
                        warn!(
                            "Attempt {}/{}: bad response status for {}: {}",
                            attempt,
                            MAX_TRIES,
                            url,
                            response.status()
                        );
                        last_error = Some(WqError::HttpStatus {
                            url: url.clone(),
                            status: response.status().as_u16(),
                        });
                    } else {
                        match response.text().await {
                            Ok(body) => {
                                if body.len() <= 2 {
                                    warn!(
                                        "Attempt {}/{}: empty response for {}",
                                        attempt, MAX_TRIES, url
                                    );
                                    last_error =
                                        Some(WqError::EmptyResponse { url: url.clone() });
                                } else {
                                    self.cache.borrow_mut().insert(url, body.clone());
                                    return Ok(body);
                                }
                            }
                            Err(e) => {
                                warn!(
                                    "Attempt {}/{}: failed to read response body for {}: {}",
                                    attempt, MAX_TRIES, url, e
                                );
                                last_error = Some(e.into());
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: request failed for {}: {}",
                        attempt, MAX_TRIES, url, e
                    );
                    last_error = Some(e.into());
                }
            }

            if attempt < MAX_TRIES {
                info!(
                    "Sleeping for {} milliseconds before retry for {}",
                    sleep_millis, url
                );
                #[cfg(not(target_arch = "wasm32"))]
                std::thread::sleep(std::time::Duration::from_millis(sleep_millis));
                sleep_millis *= 2;
            }
        }

        warn!("All attempts failed for {url}");
        Err(last_error.unwrap_or(WqError::EmptyResponse { url }))
    }
}

impl Default for DataClient {
    fn default() -> Self {
        Self::new()
    }
}
