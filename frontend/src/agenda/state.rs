//! # Agenda State
//!
//! Holds everything the appointment screen shows: cached pets, services and
//! appointments, the displayed month, the selected day and the booking being
//! filled in. Views are derived on demand from the pure functions in the
//! sibling modules.

use chrono::{Datelike, NaiveDate};
use shared::{Appointment, Pet, Service};

use crate::agenda::booking::{submit_booking, BookingError, PendingBooking};
use crate::agenda::calendar::{build_calendar, month_name, shift_month, CalendarMonth};
use crate::agenda::occupancy::{resolve_day, DaySlot, SlotOccupancy};
use crate::agenda::slots::time_slots;
use crate::services::{ApiResult, PetShopApi};

#[derive(Debug, Clone)]
pub struct AgendaState {
    pub pets: Vec<Pet>,
    pub services: Vec<Service>,
    pub appointments: Vec<Appointment>,

    /// Displayed month (1-12)
    pub selected_month: u32,
    pub selected_year: i32,

    pub selected_day: Option<NaiveDate>,
    pub pending: PendingBooking,

    slots: Vec<String>,
}

impl AgendaState {
    /// Empty agenda showing the month of `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            pets: Vec::new(),
            services: Vec::new(),
            appointments: Vec::new(),
            selected_month: today.month(),
            selected_year: today.year(),
            selected_day: None,
            pending: PendingBooking::default(),
            slots: time_slots(),
        }
    }

    /// Refresh all caches at once. On failure the previous caches are kept.
    pub async fn load<A: PetShopApi + ?Sized>(&mut self, api: &A) -> ApiResult<()> {
        let (pets, services, appointments) = tokio::try_join!(
            api.list_pets(),
            api.list_services(),
            api.list_appointments()
        )?;

        log::info!(
            "Loaded agenda: {} pets, {} services, {} appointments",
            pets.len(),
            services.len(),
            appointments.len()
        );
        self.pets = pets;
        self.services = services;
        self.appointments = appointments;
        Ok(())
    }

    pub fn navigate_to_previous_month(&mut self) {
        self.shift_month(-1);
    }

    pub fn navigate_to_next_month(&mut self) {
        self.shift_month(1);
    }

    pub fn shift_month(&mut self, offset: i32) {
        let (month, year) = shift_month(self.selected_month, self.selected_year, offset);
        self.selected_month = month;
        self.selected_year = year;
        log::info!("Navigated to {}/{}", self.selected_month, self.selected_year);
    }

    pub fn current_month_name(&self) -> &'static str {
        month_name(self.selected_month)
    }

    /// Grid of the displayed month
    pub fn calendar(&self, today: NaiveDate) -> Option<CalendarMonth> {
        build_calendar(self.selected_month, self.selected_year, today, self.selected_day)
    }

    /// Select a day; a day outside the displayed month also moves the calendar there
    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected_day = Some(day);
        self.selected_month = day.month();
        self.selected_year = day.year();
    }

    /// Slots of the selected day, empty when no day is selected
    pub fn day_schedule(&self) -> Vec<DaySlot> {
        match self.selected_day {
            Some(day) => resolve_day(day, &self.slots, &self.appointments, &self.pets, &self.services),
            None => Vec::new(),
        }
    }

    /// Put a vacant slot of the selected day into the pending booking
    pub fn select_slot(&mut self, time: &str) -> Result<(), BookingError> {
        let day = self.selected_day.ok_or(BookingError::InvalidTime)?;

        let schedule = self.day_schedule();
        let slot = schedule
            .iter()
            .find(|s| s.time == time)
            .ok_or(BookingError::InvalidTime)?;

        if let SlotOccupancy::Occupied { .. } = slot.occupancy {
            log::warn!("Slot {} on {} is already booked", time, day);
            return Err(BookingError::SlotTaken(time.to_string()));
        }

        self.pending.date = Some(day);
        self.pending.time = Some(slot.time.clone());
        Ok(())
    }

    pub fn choose_pet(&mut self, pet_id: i64) {
        self.pending.pet_id = Some(pet_id);
    }

    /// Service is chosen by name; unknown names are created on submit
    pub fn choose_service(&mut self, name: &str) {
        self.pending.service_name = Some(name.to_string());
    }

    pub async fn submit<A: PetShopApi + ?Sized>(&mut self, api: &A) -> Result<Appointment, BookingError> {
        submit_booking(api, &mut self.pending, &mut self.services, &mut self.appointments).await
    }
}
