//! The booking wizard.
//!
//! A booking walks linearly through [`BookingStep::Service`] →
//! [`BookingStep::DateTime`] → [`BookingStep::Details`] →
//! [`BookingStep::Confirm`] → [`BookingStep::Success`]. All mutation goes
//! through the transition methods on [`BookingFlow`]; the UI never writes
//! fields directly.
//!
//! Submission is split in two so the network call can live in the frontend:
//! [`BookingFlow::begin_submit`] validates and builds the request,
//! [`BookingFlow::complete_submit`] records the backend's answer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{Appointment, BookAppointmentRequest, Treatment, TreatmentCategory};
use crate::calendar::{format_warm_date, to_iso_date};

pub const MISSING_SELECTION_MESSAGE: &str =
    "Bitte wähle eine Behandlung, ein Datum und eine Uhrzeit aus.";
pub const BOOKING_FAILED_MESSAGE: &str = "Buchung fehlgeschlagen";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    Service,
    DateTime,
    Details,
    Confirm,
    Success,
}

impl BookingStep {
    /// Stage reached by the back button; `None` where back is not offered
    pub fn predecessor(&self) -> Option<BookingStep> {
        match self {
            BookingStep::DateTime => Some(BookingStep::Service),
            BookingStep::Details => Some(BookingStep::DateTime),
            BookingStep::Confirm => Some(BookingStep::Details),
            BookingStep::Service | BookingStep::Success => None,
        }
    }

    /// 1-based position for the progress indicator
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::Service => 1,
            BookingStep::DateTime => 2,
            BookingStep::Details => 3,
            BookingStep::Confirm => 4,
            BookingStep::Success => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookingStep::Service => "Behandlung wählen",
            BookingStep::DateTime => "Datum & Uhrzeit",
            BookingStep::Details => "Deine Angaben",
            BookingStep::Confirm => "Bestätigen",
            BookingStep::Success => "Gebucht",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Bitte wähle eine Behandlung, ein Datum und eine Uhrzeit aus.")]
    MissingSelection,
    #[error("Buchung wird bereits gesendet")]
    AlreadySubmitting,
}

/// Everything the user has chosen so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingState {
    pub step: BookingStep,
    pub selected_category: Option<TreatmentCategory>,
    pub selected_treatment: Option<Treatment>,
    pub selected_date: Option<NaiveDate>,
    /// `HH:MM`; only meaningful while `selected_date` is set
    pub selected_time: Option<String>,
    pub customer_notes: String,
    pub apply_loyalty_reward: bool,
}

impl Default for BookingState {
    fn default() -> Self {
        Self {
            step: BookingStep::Service,
            selected_category: None,
            selected_treatment: None,
            selected_date: None,
            selected_time: None,
            customer_notes: String::new(),
            apply_loyalty_reward: false,
        }
    }
}

impl BookingState {
    /// Local `YYYY-MM-DDTHH:MM:00` timestamp sent to the backend
    pub fn scheduled_at(&self) -> Option<String> {
        let date = self.selected_date?;
        let time = self.selected_time.as_deref()?;
        Some(format!("{}T{}:00", to_iso_date(date), time))
    }

    pub fn has_complete_selection(&self) -> bool {
        self.selected_treatment.is_some() && self.selected_date.is_some() && self.selected_time.is_some()
    }
}

/// Booking wizard state plus submission bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingFlow {
    state: BookingState,
    is_submitting: bool,
    error: Option<String>,
    booked_appointment: Option<Appointment>,
}

impl BookingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn step(&self) -> BookingStep {
        self.state.step
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn booked_appointment(&self) -> Option<&Appointment> {
        self.booked_appointment.as_ref()
    }

    /// Jump to an arbitrary step, used when a preselection skips ahead
    pub fn set_step(&mut self, step: BookingStep) {
        self.state.step = step;
        self.error = None;
    }

    pub fn select_category(&mut self, category: TreatmentCategory) {
        self.state.selected_category = Some(category);
    }

    pub fn select_treatment(&mut self, treatment: Treatment) {
        self.state.selected_category = Some(treatment.category);
        self.state.selected_treatment = Some(treatment);
        self.state.selected_date = None;
        self.state.selected_time = None;
        self.state.step = BookingStep::DateTime;
        self.error = None;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.selected_date = Some(date);
        self.state.selected_time = None;
    }

    pub fn select_time(&mut self, time: impl Into<String>) {
        self.state.selected_time = Some(time.into());
        self.state.step = BookingStep::Details;
        self.error = None;
    }

    pub fn set_customer_notes(&mut self, notes: impl Into<String>) {
        self.state.customer_notes = notes.into();
    }

    pub fn set_apply_loyalty_reward(&mut self, apply: bool) {
        self.state.apply_loyalty_reward = apply;
    }

    pub fn go_to_confirm(&mut self) {
        self.state.step = BookingStep::Confirm;
    }

    /// One stage back along the fixed predecessor map; keeps every selection
    pub fn go_back(&mut self) {
        if let Some(previous) = self.state.step.predecessor() {
            self.state.step = previous;
        }
        self.error = None;
    }

    /// Validate the selection and build the request to send.
    ///
    /// On a missing selection the validation message is stored on the flow and
    /// no transition happens.
    pub fn begin_submit(&mut self) -> Result<BookAppointmentRequest, BookingError> {
        if self.is_submitting {
            return Err(BookingError::AlreadySubmitting);
        }

        let treatment_id = self.state.selected_treatment.as_ref().map(|t| t.id);
        let (Some(treatment_id), Some(scheduled_at)) = (treatment_id, self.state.scheduled_at()) else {
            let error = BookingError::MissingSelection;
            self.error = Some(error.to_string());
            return Err(error);
        };

        let notes = self.state.customer_notes.trim();
        let request = BookAppointmentRequest {
            treatment_id,
            scheduled_at,
            customer_notes: if notes.is_empty() { None } else { Some(notes.to_string()) },
        };

        self.is_submitting = true;
        self.error = None;
        Ok(request)
    }

    /// Record the backend's answer to a submission started with [`BookingFlow::begin_submit`]
    pub fn complete_submit(&mut self, result: Result<Appointment, String>) {
        self.is_submitting = false;
        match result {
            Ok(appointment) => {
                self.booked_appointment = Some(appointment);
                self.state.step = BookingStep::Success;
                self.error = None;
            }
            Err(message) => {
                let message = message.trim();
                self.error = Some(if message.is_empty() {
                    BOOKING_FAILED_MESSAGE.to_string()
                } else {
                    message.to_string()
                });
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// German booking request text for the WhatsApp hand-off
pub fn whatsapp_message(state: &BookingState) -> Option<String> {
    let treatment = state.selected_treatment.as_ref()?;
    let date = state.selected_date?;
    let time = state.selected_time.as_deref()?;

    let mut message = format!(
        "Hallo Lisa!\n\nIch möchte gerne einen Termin buchen:\n\n\
         Behandlung: {}\nDatum: {}\nUhrzeit: {} Uhr\nDauer: {}\nPreis: {}\n",
        treatment.name,
        format_warm_date(date),
        time,
        treatment.formatted_duration(),
        treatment.formatted_price(),
    );
    let notes = state.customer_notes.trim();
    if !notes.is_empty() {
        message.push_str(&format!("\nAnmerkungen: {}\n", notes));
    }
    message.push_str("\nVielen Dank!");
    Some(message)
}
