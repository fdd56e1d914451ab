//! Date windows and the time range presets offered by the dashboard.

use chrono::{Days, NaiveDate};

/// An inclusive date window. Both endpoints belong to the window.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window from two dates in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Closed-interval membership: both endpoints are inside.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Time range presets as the dashboard select box offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// The full span of the loaded data.
    FullSpan,
    /// The 365 days up to today.
    LastYear,
    /// One calendar year.
    Year(i32),
    /// Start and end picked by hand.
    Custom,
}

impl TimeRange {
    /// Selection order as presented in the dashboard.
    pub const CHOICES: [TimeRange; 7] = [
        TimeRange::FullSpan,
        TimeRange::LastYear,
        TimeRange::Year(2025),
        TimeRange::Year(2024),
        TimeRange::Year(2023),
        TimeRange::Year(2022),
        TimeRange::Custom,
    ];

    pub fn label(&self) -> String {
        match self {
            TimeRange::FullSpan => "Gesamtzeitraum".to_string(),
            TimeRange::LastYear => "Letzte 365 Tage".to_string(),
            TimeRange::Year(year) => year.to_string(),
            TimeRange::Custom => "Benutzerdefiniert".to_string(),
        }
    }

    pub fn from_label(label: &str) -> Option<TimeRange> {
        match label {
            "Gesamtzeitraum" => Some(TimeRange::FullSpan),
            "Letzte 365 Tage" => Some(TimeRange::LastYear),
            "Benutzerdefiniert" => Some(TimeRange::Custom),
            other => other.parse::<i32>().ok().map(TimeRange::Year),
        }
    }

    /// Resolve the preset into a concrete window.
    ///
    /// `FullSpan` needs the loaded data's span and yields nothing without
    /// one. `Custom` is resolved by the caller's two date inputs, never
    /// here. Calendar years cover January 1 through December 31.
    pub fn resolve(
        &self,
        today: NaiveDate,
        data_span: Option<(NaiveDate, NaiveDate)>,
    ) -> Option<DateWindow> {
        match self {
            TimeRange::FullSpan => data_span.map(|(first, last)| DateWindow::new(first, last)),
            TimeRange::LastYear => Some(DateWindow::new(today - Days::new(365), today)),
            TimeRange::Year(year) => Some(DateWindow::new(
                NaiveDate::from_ymd_opt(*year, 1, 1)?,
                NaiveDate::from_ymd_opt(*year, 12, 31)?,
            )),
            TimeRange::Custom => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn window_contains_both_endpoints() {
        let window = DateWindow::new(d(2024, 5, 1), d(2024, 5, 31));
        assert!(window.contains(d(2024, 5, 1)));
        assert!(window.contains(d(2024, 5, 31)));
        assert!(window.contains(d(2024, 5, 15)));
        assert!(!window.contains(d(2024, 4, 30)));
        assert!(!window.contains(d(2024, 6, 1)));
    }

    #[test]
    fn swapped_endpoints_are_normalized() {
        let window = DateWindow::new(d(2024, 5, 31), d(2024, 5, 1));
        assert_eq!(window.start, d(2024, 5, 1));
        assert_eq!(window.end, d(2024, 5, 31));
    }

    #[test]
    fn single_day_window_contains_itself() {
        let window = DateWindow::new(d(2024, 5, 1), d(2024, 5, 1));
        assert!(window.contains(d(2024, 5, 1)));
        assert!(!window.contains(d(2024, 5, 2)));
    }

    #[test]
    fn full_span_needs_data() {
        assert_eq!(TimeRange::FullSpan.resolve(d(2025, 8, 1), None), None);
        let span = Some((d(2021, 3, 1), d(2025, 6, 30)));
        assert_eq!(
            TimeRange::FullSpan.resolve(d(2025, 8, 1), span),
            Some(DateWindow::new(d(2021, 3, 1), d(2025, 6, 30)))
        );
    }

    #[test]
    fn year_preset_covers_the_calendar_year() {
        let window = TimeRange::Year(2024).resolve(d(2025, 8, 1), None).unwrap();
        assert_eq!(window.start, d(2024, 1, 1));
        assert_eq!(window.end, d(2024, 12, 31));
    }

    #[test]
    fn last_year_preset_ends_today() {
        let today = d(2025, 8, 25);
        let window = TimeRange::LastYear.resolve(today, None).unwrap();
        assert_eq!(window.end, today);
        assert_eq!(window.start, today - Days::new(365));
    }

    #[test]
    fn labels_round_trip() {
        for choice in TimeRange::CHOICES {
            assert_eq!(TimeRange::from_label(&choice.label()), Some(choice));
        }
        assert_eq!(TimeRange::from_label("irgendwas"), None);
    }
}
