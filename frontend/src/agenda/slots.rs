use chrono::NaiveTime;

const FIRST_HOUR: u32 = 9;
const CLOSING_HOUR: u32 = 18;
const SLOT_MINUTES: u32 = 30;

/// Bookable start times of a working day as "HH:MM", 09:00 through 18:00.
///
/// Half-hour slots up to 17:30, then 18:00 as the last booking of the day.
pub fn time_slots() -> Vec<String> {
    let mut slots: Vec<String> = (FIRST_HOUR..CLOSING_HOUR)
        .flat_map(|hour| (0..60).step_by(SLOT_MINUTES as usize).map(move |minute| (hour, minute)))
        .map(|(hour, minute)| format!("{:02}:{:02}", hour, minute))
        .collect();
    slots.push(format!("{:02}:00", CLOSING_HOUR));
    slots
}

/// Parse an "HH:MM" slot label
pub fn parse_slot(slot: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(slot.trim(), "%H:%M").ok()
}
