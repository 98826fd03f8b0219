use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    clock::ClockTime,
    errors::{SalonError, SalonResult},
    models::service::Service,
    settings::{deposit_for, BankDetails, PaymentInstructions},
};

const REFERENCE_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Active bookings occupy their slot on the calendar.
    pub fn is_active(&self) -> bool {
        *self != BookingStatus::Cancelled
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "paid" => Ok(BookingStatus::Paid),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(SalonError::Validation(format!(
                "Unknown booking status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub customer_id: Uuid,
    pub service_id: String,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub status: BookingStatus,
    pub deposit_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Builds a new pending booking for `service` starting at `start`.
    pub fn new(
        customer_id: Uuid,
        service: &Service,
        date: NaiveDate,
        start: ClockTime,
        deposit_percent: u32,
    ) -> SalonResult<Self> {
        let end = end_of(service, start)?;

        Ok(Self {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            customer_id,
            service_id: service.id.clone(),
            date,
            start_time: start,
            end_time: end,
            status: BookingStatus::Pending,
            deposit_cents: deposit_for(service.price_cents, deposit_percent),
            total_cents: service.price_cents,
            created_at: Utc::now(),
        })
    }

    /// Fails for cancelled and completed bookings.
    pub fn ensure_reschedulable(&self) -> SalonResult<()> {
        match self.status {
            BookingStatus::Cancelled | BookingStatus::Completed => Err(SalonError::Validation(
                format!("Cannot reschedule a {} booking", self.status),
            )),
            BookingStatus::Pending | BookingStatus::Paid => Ok(()),
        }
    }

    /// Moves the booking to a new slot, possibly for a different service.
    ///
    /// The booking goes back to `pending` until the deposit is confirmed
    /// again. Prices are recomputed only when the service changes.
    pub fn reschedule(
        &mut self,
        service: &Service,
        date: NaiveDate,
        start: ClockTime,
        deposit_percent: u32,
    ) -> SalonResult<()> {
        self.ensure_reschedulable()?;

        let end = end_of(service, start)?;
        if service.id != self.service_id {
            self.service_id = service.id.clone();
            self.total_cents = service.price_cents;
            self.deposit_cents = deposit_for(service.price_cents, deposit_percent);
        }
        self.date = date;
        self.start_time = start;
        self.end_time = end;
        self.status = BookingStatus::Pending;
        Ok(())
    }

    /// Marks the deposit as received. Returns false if it already was.
    pub fn confirm_deposit(&mut self) -> SalonResult<bool> {
        match self.status {
            BookingStatus::Pending => {
                self.status = BookingStatus::Paid;
                Ok(true)
            }
            BookingStatus::Paid => Ok(false),
            BookingStatus::Completed | BookingStatus::Cancelled => Err(SalonError::Validation(
                format!("Cannot confirm the deposit of a {} booking", self.status),
            )),
        }
    }

    pub fn complete(&mut self) -> SalonResult<()> {
        if self.status != BookingStatus::Paid {
            return Err(SalonError::Validation(format!(
                "Only paid bookings can be completed, this one is {}",
                self.status
            )));
        }
        self.status = BookingStatus::Completed;
        Ok(())
    }

    pub fn cancel(&mut self) -> SalonResult<()> {
        if self.status == BookingStatus::Completed {
            return Err(SalonError::Validation(
                "Cannot cancel a completed booking".to_string(),
            ));
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    pub fn payment_instructions(&self, bank: BankDetails) -> PaymentInstructions {
        PaymentInstructions {
            reference: self.reference.clone(),
            deposit_cents: self.deposit_cents,
            total_cents: self.total_cents,
            bank,
        }
    }
}

fn end_of(service: &Service, start: ClockTime) -> SalonResult<ClockTime> {
    if service.duration_minutes == 0 {
        return Err(SalonError::Validation(format!(
            "Service '{}' has no duration",
            service.id
        )));
    }
    start.checked_add(service.duration_minutes).ok_or_else(|| {
        SalonError::Validation(format!(
            "Service '{}' starting at {} would end after midnight",
            service.id, start
        ))
    })
}

/// Short code the client quotes when transferring the deposit.
pub fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Orders bookings chronologically: by date, then start time.
pub fn sort_chronologically(bookings: &mut [Booking]) {
    bookings.sort_by_key(|booking| (booking.date, booking.start_time));
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: Uuid,
    pub service_id: String,
    pub date: NaiveDate,
    pub time: ClockTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking: Booking,
    pub payment: PaymentInstructions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleBookingRequest {
    pub customer_id: Uuid,
    pub service_id: Option<String>,
    pub date: NaiveDate,
    pub time: ClockTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub requester_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionRequest {
    pub admin_id: Uuid,
}

/// A booking as shown on the salon's agenda, with who booked it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBookingEntry {
    #[serde(flatten)]
    pub booking: Booking,
    /// `None` when the client account no longer exists.
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBookingsResponse {
    pub bookings: Vec<AdminBookingEntry>,
    pub awaiting_deposit: usize,
}
