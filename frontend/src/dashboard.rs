use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use shared::{Appointment, Pet, VaccineRecord};

const VACCINE_WARNING_DAYS: i64 = 7;
const UPCOMING_LIMIT: usize = 3;

/// Figures shown on the home screen
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub appointments_today: Vec<Appointment>,
    /// Vaccines with a next dose between today and a week from today, inclusive
    pub vaccines_due: Vec<VaccineRecord>,
    pub owner_count: usize,
    pub pet_count: usize,
    /// First three of today's appointments by time
    pub upcoming: Vec<Appointment>,
}

/// Summarise the caches for `today` (a UTC date)
pub fn summarize(
    pets: &[Pet],
    appointments: &[Appointment],
    vaccines: &[VaccineRecord],
    today: NaiveDate,
) -> DashboardSummary {
    let appointments_today: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.date_time.date_naive() == today)
        .cloned()
        .collect();

    let horizon = today + Duration::days(VACCINE_WARNING_DAYS);
    let vaccines_due = vaccines
        .iter()
        .filter(|v| matches!(v.next_dose, Some(next) if next >= today && next <= horizon))
        .cloned()
        .collect();

    let owner_count = pets.iter().map(|p| p.owner.as_str()).collect::<HashSet<_>>().len();

    let mut upcoming = appointments_today.clone();
    upcoming.sort_by_key(|a| a.date_time);
    upcoming.truncate(UPCOMING_LIMIT);

    DashboardSummary {
        appointments_today,
        vaccines_due,
        owner_count,
        pet_count: pets.len(),
        upcoming,
    }
}
