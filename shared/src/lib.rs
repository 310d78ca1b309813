//! Types and pure logic shared by the studio booking frontend and the relay server.
//!
//! Nothing in this crate touches the network or the browser. The frontend
//! drives these types from its hooks; the server uses the DTOs to forward
//! OAuth payloads and log lines.

pub mod api;
pub mod availability;
pub mod booking;
pub mod calendar;
pub mod service_mapping;
pub mod session;
pub mod time_slots;

pub use api::{
    ApiResponse, Appointment, AppointmentStatus, AuthResponse, AvailableSlotsResponse,
    BookAppointmentRequest, DayOfWeek, LogRequest, LogResponse, LoyaltyStatus,
    OAuthCallbackRequest, PublicConfig, RefreshTokenRequest, TimeSlot, Treatment,
    TreatmentCategory, User, WeeklyAvailability,
};
pub use booking::{BookingError, BookingFlow, BookingState, BookingStep};
pub use calendar::{CalendarDay, CalendarGrid, DayStatus, YearMonth};
pub use service_mapping::{ServiceMapping, ServicePreselection};
pub use session::SessionAction;
pub use time_slots::{DisplaySlot, PartitionedSlots};
