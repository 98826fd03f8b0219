//! # Slot Availability
//!
//! Collision detection between a requested appointment and the bookings
//! already on the calendar, plus the enumeration of bookable slots inside
//! the salon's working hours.
//!
//! Intervals are half-open: `[start, end)`. A booking that ends at 11:00
//! does not collide with one that starts at 11:00.
//!
//! Every function here is pure. Callers fetch bookings from storage, ask the
//! checker, and persist afterwards; nothing reserves the slot in between.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    clock::{ClockTime, MINUTES_PER_DAY},
    errors::{SalonError, SalonResult},
    models::booking::Booking,
};

/// Returns true when `[a_start, a_end)` and `[b_start, b_end)` share any minute.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}

/// Checks whether `duration_minutes` starting at `requested_start` can be
/// booked on `date` without colliding with an active booking.
///
/// Bookings for other dates, cancelled bookings, and the booking identified
/// by `exclude_id` are ignored. The duration is not validated; callers must
/// pass a positive value and enforce the working-hours boundary themselves.
pub fn is_available(
    date: NaiveDate,
    requested_start: u32,
    duration_minutes: u32,
    bookings: &[Booking],
    exclude_id: Option<Uuid>,
) -> bool {
    let requested_end = requested_start + duration_minutes;

    bookings
        .iter()
        .filter(|booking| booking.date == date)
        .filter(|booking| booking.status.is_active())
        .filter(|booking| Some(booking.id) != exclude_id)
        .all(|booking| {
            !overlaps(
                requested_start,
                requested_end,
                booking.start_time.minutes(),
                booking.end_time.minutes(),
            )
        })
}

/// Opening window and slot granularity for a working day.
///
/// Only built through [`WorkingHours::new`], deserialization included, so a
/// value always has `start_hour < end_hour <= 24` and a positive slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkingHoursFields")]
pub struct WorkingHours {
    start_hour: u32,
    end_hour: u32,
    slot_minutes: u32,
}

#[derive(Deserialize)]
struct WorkingHoursFields {
    start_hour: u32,
    end_hour: u32,
    slot_minutes: u32,
}

impl TryFrom<WorkingHoursFields> for WorkingHours {
    type Error = SalonError;

    fn try_from(fields: WorkingHoursFields) -> Result<Self, Self::Error> {
        WorkingHours::new(fields.start_hour, fields.end_hour, fields.slot_minutes)
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 19,
            slot_minutes: 30,
        }
    }
}

impl WorkingHours {
    pub fn new(start_hour: u32, end_hour: u32, slot_minutes: u32) -> SalonResult<Self> {
        if start_hour >= end_hour || end_hour > MINUTES_PER_DAY / 60 {
            return Err(SalonError::Validation(format!(
                "Invalid working hours {}h-{}h",
                start_hour, end_hour
            )));
        }
        if slot_minutes == 0 {
            return Err(SalonError::Validation(
                "Slot granularity must be positive".to_string(),
            ));
        }

        Ok(Self {
            start_hour,
            end_hour,
            slot_minutes,
        })
    }

    pub fn start_hour(self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(self) -> u32 {
        self.end_hour
    }

    pub fn slot_minutes(self) -> u32 {
        self.slot_minutes
    }

    pub fn opening(self) -> u32 {
        self.start_hour * 60
    }

    pub fn closing(self) -> u32 {
        self.end_hour * 60
    }

    /// Whether an appointment of `duration_minutes` starting at `start` lies
    /// entirely inside the window.
    pub fn fits(self, start: u32, duration_minutes: u32) -> bool {
        start >= self.opening() && start + duration_minutes <= self.closing()
    }

    /// Every grid start time whose appointment would finish by closing time.
    pub fn candidate_starts(self, duration_minutes: u32) -> impl Iterator<Item = u32> {
        let closing = self.closing();
        (self.opening()..closing)
            .step_by(self.slot_minutes as usize)
            .take_while(move |start| start + duration_minutes <= closing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub time: ClockTime,
    pub available: bool,
}

/// Runs the checker for every candidate start of the day.
pub fn slot_grid(
    hours: WorkingHours,
    date: NaiveDate,
    duration_minutes: u32,
    bookings: &[Booking],
    exclude_id: Option<Uuid>,
) -> Vec<SlotAvailability> {
    hours
        .candidate_starts(duration_minutes)
        .filter_map(|start| {
            let time = ClockTime::from_minutes(start)?;
            let available = is_available(date, start, duration_minutes, bookings, exclude_id);
            Some(SlotAvailability { time, available })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub service_id: String,
    pub duration_minutes: u32,
    pub slots: Vec<SlotAvailability>,
}
