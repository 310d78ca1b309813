pub mod use_availability;
pub mod use_booking;
pub mod use_loyalty_status;
pub mod use_my_appointments;
pub mod use_service_preselection;
pub mod use_session;
pub mod use_treatments;
