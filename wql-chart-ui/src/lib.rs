//! Shared Dioxus components and Leaflet/D3.js bridge for the water
//! quality dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the map, chart and download scripts
//!   via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (map, pickers, metrics, etc.)

pub mod js_bridge;
pub mod state;
pub mod components;
