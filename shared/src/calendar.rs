use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::CALENDAR_CONTAINER_ID;
use crate::error::DatasetError;

const EVENTS_JSON: &str = include_str!("../data/events.json");

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub day: u32,
    pub title: String,
    pub location: String,
    pub description: String,
}

/// A calendar page, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    first: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Padding before the 1st so it lands under its weekday.
    Blank,
    Day {
        day: u32,
        is_today: bool,
        has_event: bool,
    },
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DatasetError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(DatasetError::InvalidMonth { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.first.month0() as usize]
    }

    /// Heading text, e.g. `September 2023`.
    pub fn label(self) -> String {
        format!("{} {}", self.month_name(), self.year())
    }

    /// Number of blank cells before the 1st, with Sunday as column 0.
    pub fn leading_blanks(self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn days_in_month(self) -> u32 {
        self.next()
            .first
            .signed_duration_since(self.first)
            .num_days() as u32
    }

    pub fn prev(self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn next(self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn date(self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }
}

/// Events for one month, keyed by day of month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCalendar {
    month: CalendarMonth,
    events: BTreeMap<u32, CalendarEvent>,
}

#[derive(Debug, Deserialize)]
struct EventData {
    year: i32,
    month: u32,
    events: Vec<CalendarEvent>,
}

impl EventCalendar {
    /// Every event must fall on a real day of `month`, at most one per day.
    pub fn new(month: CalendarMonth, events: Vec<CalendarEvent>) -> Result<Self, DatasetError> {
        let mut by_day = BTreeMap::new();
        for event in events {
            let day = event.day;
            if month.date(day).is_none() {
                return Err(DatasetError::InvalidEventDay {
                    day,
                    month: month.label(),
                });
            }
            if by_day.insert(day, event).is_some() {
                return Err(DatasetError::DuplicateEventDay(day));
            }
        }
        Ok(Self {
            month,
            events: by_day,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let data: EventData =
            serde_json::from_str(json).map_err(DatasetError::malformed("calendar"))?;
        Self::new(CalendarMonth::new(data.year, data.month)?, data.events)
    }

    pub fn sample() -> Result<Self, DatasetError> {
        Self::from_json(EVENTS_JSON)
    }

    /// The month the events belong to.
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn event_on(&self, month: CalendarMonth, day: u32) -> Option<&CalendarEvent> {
        if month != self.month {
            return None;
        }
        self.events.get(&day)
    }

    /// Grid cells for `month`: leading blanks, then one cell per day.
    pub fn cells(&self, month: CalendarMonth, today: Option<NaiveDate>) -> Vec<DayCell> {
        let blanks = month.leading_blanks();
        let mut cells = Vec::with_capacity((blanks + month.days_in_month()) as usize);
        cells.extend((0..blanks).map(|_| DayCell::Blank));
        for day in 1..=month.days_in_month() {
            cells.push(DayCell::Day {
                day,
                is_today: today.is_some() && month.date(day) == today,
                has_event: self.event_on(month, day).is_some(),
            });
        }
        cells
    }
}

/// Mount configuration for the calendar controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    pub container_id: String,
    pub events: EventCalendar,
    /// Page shown first.
    pub initial_month: CalendarMonth,
}

impl CalendarConfig {
    pub fn sample() -> Result<Self, DatasetError> {
        let events = EventCalendar::sample()?;
        Ok(Self {
            container_id: CALENDAR_CONTAINER_ID.to_string(),
            initial_month: events.month(),
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn september() -> CalendarMonth {
        CalendarMonth::new(2023, 9).expect("valid month")
    }

    #[test]
    fn september_2023_starts_on_friday_with_thirty_days() {
        let month = september();
        assert_eq!(month.leading_blanks(), 5);
        assert_eq!(month.days_in_month(), 30);
        assert_eq!(month.label(), "September 2023");
    }

    #[test]
    fn grid_has_blanks_then_days() {
        let events = EventCalendar::sample().expect("bundled events parse");
        let cells = events.cells(september(), None);
        assert_eq!(cells.len(), 35);
        assert!(cells[..5].iter().all(|c| *c == DayCell::Blank));
        let event_days: Vec<u32> = cells
            .iter()
            .filter_map(|c| match c {
                DayCell::Day {
                    day,
                    has_event: true,
                    ..
                } => Some(*day),
                _ => None,
            })
            .collect();
        assert_eq!(event_days, vec![15, 22, 27]);
    }

    #[test]
    fn events_only_show_in_their_month() {
        let events = EventCalendar::sample().expect("bundled events parse");
        let october = september().next();
        assert!(events.event_on(october, 15).is_none());
        assert!(
            events
                .cells(october, None)
                .iter()
                .all(|c| !matches!(c, DayCell::Day { has_event: true, .. }))
        );
        let festival = events.event_on(september(), 15).expect("event on 15th");
        assert_eq!(festival.title, "Pang Lhabsol Festival");
    }

    #[test]
    fn today_is_marked_by_full_date() {
        let events = EventCalendar::sample().expect("bundled events parse");
        let today = NaiveDate::from_ymd_opt(2023, 9, 22);
        let cells = events.cells(september(), today);
        let marked: Vec<_> = cells
            .iter()
            .filter(|c| matches!(c, DayCell::Day { is_today: true, .. }))
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(
            *marked[0],
            DayCell::Day {
                day: 22,
                is_today: true,
                has_event: true
            }
        );

        let next_year = NaiveDate::from_ymd_opt(2024, 9, 22);
        assert!(
            events
                .cells(september(), next_year)
                .iter()
                .all(|c| !matches!(c, DayCell::Day { is_today: true, .. }))
        );
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        let january = CalendarMonth::new(2024, 1).expect("valid month");
        assert_eq!(january.prev().label(), "December 2023");
        assert_eq!(january.prev().next(), january);
        let february = january.next();
        assert_eq!(february.days_in_month(), 29);
        // 1 Feb 2024 was a Thursday
        assert_eq!(february.leading_blanks(), 4);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(matches!(
            CalendarMonth::new(2023, 13),
            Err(DatasetError::InvalidMonth {
                year: 2023,
                month: 13
            })
        ));
    }

    fn events_json(days: &[u32]) -> String {
        let events: Vec<_> = days
            .iter()
            .map(|day| {
                serde_json::json!({
                    "day": day,
                    "title": format!("Puja {day}"),
                    "location": "Rumtek",
                    "description": "Morning prayers",
                })
            })
            .collect();
        serde_json::json!({ "year": 2023, "month": 9, "events": events }).to_string()
    }

    #[test]
    fn event_outside_its_month_is_rejected() {
        let err = EventCalendar::from_json(&events_json(&[15, 31])).expect_err("31 September");
        assert!(matches!(err, DatasetError::InvalidEventDay { day: 31, .. }));
        assert!(err.to_string().contains("September 2023"));

        let err = EventCalendar::from_json(&events_json(&[0])).expect_err("day zero");
        assert!(matches!(err, DatasetError::InvalidEventDay { day: 0, .. }));
    }

    #[test]
    fn two_events_on_one_day_are_rejected() {
        let err = EventCalendar::from_json(&events_json(&[15, 22, 15])).expect_err("duplicate");
        assert!(matches!(err, DatasetError::DuplicateEventDay(15)));
    }

    #[test]
    fn every_loaded_event_is_rendered() {
        let events = EventCalendar::from_json(&events_json(&[1, 30])).expect("valid days");
        let shown = events
            .cells(september(), None)
            .iter()
            .filter(|c| matches!(c, DayCell::Day { has_event: true, .. }))
            .count();
        assert_eq!(shown, events.len());
    }

    #[test]
    fn containing_snaps_to_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 18).expect("valid date");
        assert_eq!(CalendarMonth::containing(date), september());
    }
}
