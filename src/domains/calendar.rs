use time::{Date, Month, Weekday};

use crate::domains::records::CalendarEvent;
use crate::error::{DeskmateError, Result};

/// Events of one calendar day, in collection order.
#[derive(Debug, Clone)]
pub struct DayAgenda {
    pub day: u8,
    pub weekday: Weekday,
    pub events: Vec<CalendarEvent>,
}

pub fn events_on(events: &[CalendarEvent], year: i32, month: u8, day: u8) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.date.ymd() == Some((year, month, day)))
        .collect()
}

/// One entry per day of the month. Events with an invalid date never land
/// on any day.
pub fn month_agenda(events: &[CalendarEvent], year: i32, month: u8) -> Result<Vec<DayAgenda>> {
    let month_value = Month::try_from(month)
        .map_err(|e| DeskmateError::Runtime(format!("invalid month {month}: {e}")))?;
    let days = time::util::days_in_year_month(year, month_value);

    let mut agenda = Vec::with_capacity(usize::from(days));
    for day in 1..=days {
        let date = Date::from_calendar_date(year, month_value, day)
            .map_err(|e| DeskmateError::Runtime(e.to_string()))?;
        agenda.push(DayAgenda {
            day,
            weekday: date.weekday(),
            events: events_on(events, year, month, day)
                .into_iter()
                .cloned()
                .collect(),
        });
    }
    Ok(agenda)
}

/// Shifts a (year, month) pair by `delta` months.
pub fn shift_month(year: i32, month: u8, delta: i32) -> (i32, u8) {
    let index = year * 12 + i32::from(month) - 1 + delta;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u8)
}
