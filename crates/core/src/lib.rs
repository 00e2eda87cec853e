//! # Roombook Core
//!
//! Domain types and rules for booking practice rooms: the availability
//! checker, the slot generator, the store traits, and the booking flow that
//! drives them. Nothing in this crate reads the wall clock or talks to a
//! database directly.

pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod slots;
pub mod store;

pub use availability::{TimeRange, is_slot_available};
pub use slots::{TimeSlot, generate_slots};
