//! # Agenda
//!
//! Appointment scheduling view-model: bookable time slots, the month grid,
//! which slots of a day are taken, and booking submission.

pub mod booking;
pub mod calendar;
pub mod occupancy;
pub mod slots;
pub mod state;

pub use booking::{submit_booking, BookingError, PendingBooking};
pub use calendar::{build_calendar, shift_month, CalendarDay, CalendarDayType, CalendarMonth};
pub use occupancy::{resolve_day, DaySlot, SlotOccupancy};
pub use slots::time_slots;
pub use state::AgendaState;
