//! Traffic-light classification of measurements against regulatory limits.
//!
//! Most parameters breach their limit from below: the reading is fine while
//! it stays clearly under the Grenzwert, enters a warning band just beneath
//! it and is a breach at or above it. Oxygen saturation works the other way
//! round, low saturation is the problem, so its bands mirror.

use serde::Serialize;

/// Half-open warning band width around a limit, in the limit's own unit.
pub const TOLERANCE: f64 = 0.05;

/// Classification of a reading relative to its limit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum LimitStatus {
    Green,
    Yellow,
    Red,
}

impl LimitStatus {
    /// Status line as shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            LimitStatus::Green => "🟢 Grün (OK)",
            LimitStatus::Yellow => "🟡 Gelb (Warnung)",
            LimitStatus::Red => "🔴 Rot (Grenzwert erreicht/überschritten)",
        }
    }

    /// Badge color for the status line.
    pub fn color(&self) -> &'static str {
        match self {
            LimitStatus::Green => "#2E7D32",
            LimitStatus::Yellow => "#F9A825",
            LimitStatus::Red => "#C62828",
        }
    }
}

/// Which side of the limit is the bad side.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// Values at or above the limit are a breach (the default).
    HigherIsWorse,
    /// Values at or below the limit are a breach (oxygen saturation).
    LowerIsWorse,
}

impl Direction {
    /// Oxygen saturation is healthier high; every other parameter breaches
    /// from below. Matched on the normalized column name so both the
    /// bracket and the suffix spelling of the header invert.
    pub fn for_parameter(normalized_name: &str) -> Self {
        if normalized_name
            .to_lowercase()
            .starts_with("sauerstoffsaettigung")
        {
            Direction::LowerIsWorse
        } else {
            Direction::HigherIsWorse
        }
    }
}

/// Classify a reading against a limit with the fixed tolerance band.
///
/// With `HigherIsWorse` and limit `L`: green below `L - TOLERANCE`, yellow
/// from there up to (excluding) `L`, red at or above `L`. `LowerIsWorse`
/// mirrors the bands: green above `L + TOLERANCE`, yellow down to
/// (excluding) `L`, red at or below `L`. Non-finite input has no status.
pub fn classify(value: f64, limit: f64, direction: Direction) -> Option<LimitStatus> {
    if !value.is_finite() || !limit.is_finite() {
        return None;
    }
    let status = match direction {
        Direction::HigherIsWorse => {
            if value < limit - TOLERANCE {
                LimitStatus::Green
            } else if value < limit {
                LimitStatus::Yellow
            } else {
                LimitStatus::Red
            }
        }
        Direction::LowerIsWorse => {
            if value > limit + TOLERANCE {
                LimitStatus::Green
            } else if value > limit {
                LimitStatus::Yellow
            } else {
                LimitStatus::Red
            }
        }
    };
    Some(status)
}
