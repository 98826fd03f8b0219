//! Source of "today" for booking validation.
//!
//! Dates are the salon's local wall-clock dates, so the system calendar
//! reads the server's local time zone.

use chrono::{Local, NaiveDate};

pub trait Calendar: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the host clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar(pub NaiveDate);

impl Calendar for FixedCalendar {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
