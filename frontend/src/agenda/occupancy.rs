use chrono::NaiveDate;
use shared::{Appointment, Pet, Service};

/// What a time slot of the selected day holds
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOccupancy {
    Vacant,
    /// Names are `None` when the referenced record is not loaded
    Occupied {
        appointment_id: i64,
        pet_name: Option<String>,
        service_name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub time: String,
    pub occupancy: SlotOccupancy,
}

impl DaySlot {
    pub fn is_vacant(&self) -> bool {
        self.occupancy == SlotOccupancy::Vacant
    }
}

/// Slot label of an appointment: its UTC "HH:MM"
pub fn slot_label(appointment: &Appointment) -> String {
    appointment.date_time.format("%H:%M").to_string()
}

/// Classify every slot of `day` as occupied or vacant.
///
/// An appointment fills a slot only when its UTC date is `day` and its UTC
/// time reads exactly as the slot label; times between slots (14:15) fill
/// nothing. When several appointments share a slot the first in list order wins.
pub fn resolve_day(
    day: NaiveDate,
    slots: &[String],
    appointments: &[Appointment],
    pets: &[Pet],
    services: &[Service],
) -> Vec<DaySlot> {
    let on_day: Vec<(&Appointment, String)> = appointments
        .iter()
        .filter(|a| a.date_time.date_naive() == day)
        .map(|a| (a, slot_label(a)))
        .collect();

    slots
        .iter()
        .map(|slot| {
            let occupancy = match on_day.iter().find(|(_, label)| label == slot) {
                Some((appointment, _)) => SlotOccupancy::Occupied {
                    appointment_id: appointment.id,
                    pet_name: pet_name(appointment, pets),
                    service_name: service_name(appointment, services),
                },
                None => SlotOccupancy::Vacant,
            };
            DaySlot { time: slot.clone(), occupancy }
        })
        .collect()
}

fn pet_name(appointment: &Appointment, pets: &[Pet]) -> Option<String> {
    pets.iter()
        .find(|p| p.id == appointment.pet_id)
        .or(appointment.pet.as_ref())
        .map(|p| p.name.clone())
}

fn service_name(appointment: &Appointment, services: &[Service]) -> Option<String> {
    services
        .iter()
        .find(|s| s.id == appointment.service_id)
        .or(appointment.service.as_ref())
        .map(|s| s.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::slots::time_slots;
    use chrono::{DateTime, Utc};
    use shared::AppointmentStatus;

    fn appointment(id: i64, at: &str, pet_id: i64, service_id: i64) -> Appointment {
        Appointment {
            id,
            date_time: at.parse::<DateTime<Utc>>().unwrap(),
            pet_id,
            service_id,
            status: AppointmentStatus::Scheduled,
            pet: None,
            service: None,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn pets() -> Vec<Pet> {
        vec![Pet { id: 1, name: "Rex".into(), breed: "Labrador".into(), owner: "Ana Silva".into() }]
    }

    fn services() -> Vec<Service> {
        vec![Service { id: 2, name: "Banho".into(), price: 50.0 }]
    }

    fn slot<'a>(schedule: &'a [DaySlot], time: &str) -> &'a DaySlot {
        schedule.iter().find(|s| s.time == time).unwrap()
    }

    #[test]
    fn test_aligned_appointment_occupies_slot() {
        let appointments = vec![appointment(7, "2024-03-05T14:00:00Z", 1, 2)];

        let schedule = resolve_day(day(), &time_slots(), &appointments, &pets(), &services());

        assert_eq!(
            slot(&schedule, "14:00").occupancy,
            SlotOccupancy::Occupied {
                appointment_id: 7,
                pet_name: Some("Rex".into()),
                service_name: Some("Banho".into()),
            }
        );
        assert_eq!(schedule.iter().filter(|s| !s.is_vacant()).count(), 1);
    }

    #[test]
    fn test_misaligned_appointment_occupies_nothing() {
        let appointments = vec![appointment(7, "2024-03-05T14:15:00Z", 1, 2)];

        let schedule = resolve_day(day(), &time_slots(), &appointments, &pets(), &services());

        assert!(schedule.iter().all(DaySlot::is_vacant));
    }

    #[test]
    fn test_other_days_are_ignored() {
        let appointments = vec![
            appointment(1, "2024-03-04T14:00:00Z", 1, 2),
            appointment(2, "2024-03-06T14:00:00Z", 1, 2),
        ];

        let schedule = resolve_day(day(), &time_slots(), &appointments, &pets(), &services());

        assert!(slot(&schedule, "14:00").is_vacant());
    }

    #[test]
    fn test_offset_timestamps_resolve_in_utc() {
        let appointments = vec![
            appointment(5, "2024-03-05T11:00:00-03:00", 1, 2),
            appointment(6, "2024-03-05T23:30:00-03:00", 1, 2),
        ];

        let schedule = resolve_day(day(), &time_slots(), &appointments, &pets(), &services());

        match &slot(&schedule, "14:00").occupancy {
            SlotOccupancy::Occupied { appointment_id, .. } => assert_eq!(*appointment_id, 5),
            SlotOccupancy::Vacant => panic!("14:00 should be occupied"),
        }
        assert_eq!(schedule.iter().filter(|s| !s.is_vacant()).count(), 1);
    }

    #[test]
    fn test_first_appointment_wins_shared_slot() {
        let appointments = vec![
            appointment(3, "2024-03-05T09:30:00Z", 1, 2),
            appointment(4, "2024-03-05T09:30:00Z", 1, 2),
        ];

        let schedule = resolve_day(day(), &time_slots(), &appointments, &pets(), &services());

        match &slot(&schedule, "09:30").occupancy {
            SlotOccupancy::Occupied { appointment_id, .. } => assert_eq!(*appointment_id, 3),
            SlotOccupancy::Vacant => panic!("09:30 should be occupied"),
        }
    }

    #[test]
    fn test_unknown_references_leave_names_absent() {
        let appointments = vec![appointment(9, "2024-03-05T18:00:00Z", 40, 50)];

        let schedule = resolve_day(day(), &time_slots(), &appointments, &pets(), &services());

        assert_eq!(
            slot(&schedule, "18:00").occupancy,
            SlotOccupancy::Occupied { appointment_id: 9, pet_name: None, service_name: None }
        );
    }

    #[test]
    fn test_slots_partition_into_occupied_and_vacant() {
        let appointments = vec![
            appointment(1, "2024-03-05T09:00:00Z", 1, 2),
            appointment(2, "2024-03-05T12:30:00Z", 1, 2),
            appointment(3, "2024-03-05T12:45:00Z", 1, 2),
        ];
        let slots = time_slots();

        let schedule = resolve_day(day(), &slots, &appointments, &pets(), &services());

        assert_eq!(schedule.len(), slots.len());
        let occupied = schedule.iter().filter(|s| !s.is_vacant()).count();
        let vacant = schedule.iter().filter(|s| s.is_vacant()).count();
        assert_eq!(occupied, 2);
        assert_eq!(occupied + vacant, slots.len());
    }
}
