//! Visible date window selection

use crate::data::Event;
use crate::host::TimelineConfig;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive date range the chart covers, both bounds normalized to
/// January 1 of their years. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateWindow {
    pub fn min_year(&self) -> i32 {
        self.min.year()
    }

    pub fn max_year(&self) -> i32 {
        self.max.year()
    }

    /// Whether a year falls inside the window, bounds inclusive.
    pub fn contains_year(&self, year: i32) -> bool {
        year >= self.min_year() && year <= self.max_year()
    }
}

/// Selected window plus the events that will actually be laid out.
#[derive(Debug, Clone)]
pub struct WindowSelection {
    pub window: DateWindow,
    pub events: Vec<Event>,
}

/// January 1 of a year, saturating at chrono's representable range.
pub(crate) fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(if year > 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Pick the visible window for the given events and offsets.
///
/// The candidate window spans `years_back` before to `years_forward`
/// after today's year. Events inside it win; when none qualify the
/// window falls back to the span of the data itself and the full
/// (capped) event set is kept. Returns `None` when no event carries a
/// date at all, which downstream treats as a no-render condition.
pub fn select_window(
    events: Vec<Event>,
    today: NaiveDate,
    config: &TimelineConfig,
) -> Option<WindowSelection> {
    let candidate = DateWindow {
        min: jan_first(today.year().saturating_sub(config.years_back as i32)),
        max: jan_first(today.year().saturating_add(config.years_forward as i32)),
    };

    let in_window: Vec<Event> = events
        .iter()
        .filter(|event| {
            event
                .date
                .is_some_and(|date| candidate.contains_year(date.year()))
        })
        .cloned()
        .collect();

    if !in_window.is_empty() {
        debug!(
            events = in_window.len(),
            min = %candidate.min,
            max = %candidate.max,
            "using configured candidate window"
        );
        return Some(WindowSelection {
            window: candidate,
            events: in_window,
        });
    }

    // No event inside the configured window: span the data instead.
    let years: Vec<i32> = events
        .iter()
        .filter_map(|event| event.date.map(|date| date.year()))
        .collect();
    let min_year = *years.iter().min()?;
    let max_year = *years.iter().max()?;
    let window = DateWindow {
        min: jan_first(min_year),
        max: jan_first(max_year + 1),
    };
    debug!(
        events = events.len(),
        min = %window.min,
        max = %window.max,
        "falling back to data-driven window"
    );
    Some(WindowSelection { window, events })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EventKind;
    use crate::host::SelectionHandle;

    fn event(date: Option<NaiveDate>) -> Event {
        Event {
            company: "Acme".to_string(),
            kind: EventKind::Unknown,
            description: None,
            company_link: None,
            date,
            header_image: None,
            footer_image: None,
            identity: SelectionHandle::new("row-0"),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn candidate_window_keeps_only_in_window_events() {
        let events = vec![
            event(Some(ymd(2024, 5, 1))),
            event(Some(ymd(1999, 5, 1))),
            event(None),
        ];
        let selection =
            select_window(events, ymd(2024, 6, 15), &TimelineConfig::default()).unwrap();
        assert_eq!(selection.window.min, ymd(2023, 1, 1));
        assert_eq!(selection.window.max, ymd(2032, 1, 1));
        assert_eq!(selection.events.len(), 1);
        assert_eq!(selection.events[0].date, Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn falls_back_to_data_driven_window() {
        let events = vec![
            event(Some(ymd(2010, 3, 1))),
            event(Some(ymd(2012, 9, 1))),
            event(None),
        ];
        let selection =
            select_window(events.clone(), ymd(2024, 6, 15), &TimelineConfig::default()).unwrap();
        assert_eq!(selection.window.min, ymd(2010, 1, 1));
        assert_eq!(selection.window.max, ymd(2013, 1, 1));
        // Fallback keeps the full set, dateless events included.
        assert_eq!(selection.events.len(), events.len());
    }

    #[test]
    fn no_dated_events_means_no_window() {
        assert!(select_window(vec![], ymd(2024, 6, 15), &TimelineConfig::default()).is_none());
        assert!(
            select_window(vec![event(None)], ymd(2024, 6, 15), &TimelineConfig::default())
                .is_none()
        );
    }

    #[test]
    fn zero_offsets_collapse_to_current_year() {
        let config = TimelineConfig {
            years_back: 0,
            years_forward: 0,
            ..TimelineConfig::default()
        };
        let selection =
            select_window(vec![event(Some(ymd(2024, 8, 1)))], ymd(2024, 6, 15), &config).unwrap();
        assert_eq!(selection.window.min, selection.window.max);
        assert_eq!(selection.window.min, ymd(2024, 1, 1));
    }
}
