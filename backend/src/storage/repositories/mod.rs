pub mod appointment_repository;
pub mod pet_repository;
pub mod service_repository;
pub mod vaccine_repository;

pub use appointment_repository::AppointmentRepository;
pub use pet_repository::PetRepository;
pub use service_repository::ServiceRepository;
pub use vaccine_repository::VaccineRepository;
