//! # SalonBook Core
//!
//! Domain types shared by every SalonBook crate: bookings, the service
//! catalog, users, clock arithmetic, and the slot-availability checker.
//!
//! Nothing in this crate performs I/O. Storage lives in `salonbook-db` and
//! the HTTP surface in `salonbook-api`.

pub mod availability;
pub mod clock;
pub mod errors;
pub mod models;
pub mod settings;
