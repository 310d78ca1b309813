use std::rc::Rc;

use chrono::NaiveDate;
use shared::{
    Appointment, BookAppointmentRequest, BookingFlow, BookingStep, Treatment, TreatmentCategory,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub enum BookingAction {
    SelectCategory(TreatmentCategory),
    SelectTreatment(Treatment),
    SelectDate(NaiveDate),
    SelectTime(String),
    SetNotes(String),
    SetApplyLoyalty(bool),
    SetStep(BookingStep),
    GoToConfirm,
    GoBack,
    Submit,
    CompleteSubmit(Result<Appointment, String>),
    Reset,
}

/// A validated booking waiting to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBooking {
    /// Distinguishes a retry of the same request from the previous attempt
    pub attempt: u32,
    pub request: BookAppointmentRequest,
}

/// Reducer wrapper around the wizard so every transition goes through [`BookingFlow`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingModel {
    pub flow: BookingFlow,
    pub pending: Option<PendingBooking>,
    attempts: u32,
}

impl Reducible for BookingModel {
    type Action = BookingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let flow = &mut next.flow;
        match action {
            BookingAction::SelectCategory(category) => flow.select_category(category),
            BookingAction::SelectTreatment(treatment) => flow.select_treatment(treatment),
            BookingAction::SelectDate(date) => flow.select_date(date),
            BookingAction::SelectTime(time) => flow.select_time(time),
            BookingAction::SetNotes(notes) => flow.set_customer_notes(notes),
            BookingAction::SetApplyLoyalty(apply) => flow.set_apply_loyalty_reward(apply),
            BookingAction::SetStep(step) => flow.set_step(step),
            BookingAction::GoToConfirm => flow.go_to_confirm(),
            BookingAction::GoBack => flow.go_back(),
            BookingAction::Submit => {
                // A rejected submit leaves its message on the flow
                if let Ok(request) = flow.begin_submit() {
                    next.attempts += 1;
                    next.pending = Some(PendingBooking {
                        attempt: next.attempts,
                        request,
                    });
                }
            }
            BookingAction::CompleteSubmit(result) => {
                flow.complete_submit(result);
                next.pending = None;
            }
            BookingAction::Reset => {
                flow.reset();
                next.pending = None;
            }
        }
        Rc::new(next)
    }
}

pub struct UseBookingResult {
    pub state: BookingFlow,
    pub actions: UseBookingActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBookingActions {
    pub select_category: Callback<TreatmentCategory>,
    pub select_treatment: Callback<Treatment>,
    pub select_date: Callback<NaiveDate>,
    pub select_time: Callback<String>,
    pub set_notes: Callback<String>,
    pub set_apply_loyalty: Callback<bool>,
    pub set_step: Callback<BookingStep>,
    pub go_to_confirm: Callback<()>,
    pub go_back: Callback<()>,
    pub submit: Callback<()>,
    pub reset: Callback<()>,
}

#[hook]
pub fn use_booking(api_client: &ApiClient) -> UseBookingResult {
    let booking = use_reducer(BookingModel::default);

    // Send each validated booking exactly once
    {
        let booking = booking.clone();
        let api_client = api_client.clone();
        use_effect_with(booking.pending.clone(), move |pending| {
            if let Some(PendingBooking { attempt, request }) = pending.clone() {
                let api_client = api_client.clone();
                spawn_local(async move {
                    Logger::info_with_component(
                        "use_booking",
                        &format!(
                            "Booking treatment {} at {} (attempt {})",
                            request.treatment_id, request.scheduled_at, attempt
                        ),
                    );
                    let result = api_client.book_appointment(&request).await.map_err(|e| {
                        Logger::error_with_component("use_booking", &format!("Booking failed: {}", e));
                        e.user_message()
                    });
                    booking.dispatch(BookingAction::CompleteSubmit(result));
                });
            }
            || ()
        });
    }

    let select_category = {
        let booking = booking.clone();
        use_callback((), move |value: TreatmentCategory, _| {
            booking.dispatch(BookingAction::SelectCategory(value))
        })
    };

    let select_treatment = {
        let booking = booking.clone();
        use_callback((), move |value: Treatment, _| {
            booking.dispatch(BookingAction::SelectTreatment(value))
        })
    };

    let select_date = {
        let booking = booking.clone();
        use_callback((), move |value: NaiveDate, _| {
            booking.dispatch(BookingAction::SelectDate(value))
        })
    };

    let select_time = {
        let booking = booking.clone();
        use_callback((), move |value: String, _| {
            booking.dispatch(BookingAction::SelectTime(value))
        })
    };

    let set_notes = {
        let booking = booking.clone();
        use_callback((), move |value: String, _| {
            booking.dispatch(BookingAction::SetNotes(value))
        })
    };

    let set_apply_loyalty = {
        let booking = booking.clone();
        use_callback((), move |value: bool, _| {
            booking.dispatch(BookingAction::SetApplyLoyalty(value))
        })
    };

    let set_step = {
        let booking = booking.clone();
        use_callback((), move |value: BookingStep, _| {
            booking.dispatch(BookingAction::SetStep(value))
        })
    };

    let go_to_confirm = {
        let booking = booking.clone();
        use_callback((), move |_: (), _| booking.dispatch(BookingAction::GoToConfirm))
    };

    let go_back = {
        let booking = booking.clone();
        use_callback((), move |_: (), _| booking.dispatch(BookingAction::GoBack))
    };

    let reset = {
        let booking = booking.clone();
        use_callback((), move |_: (), _| booking.dispatch(BookingAction::Reset))
    };

    let submit = {
        let booking = booking.clone();
        use_callback((), move |_: (), _| booking.dispatch(BookingAction::Submit))
    };

    let actions = UseBookingActions {
        select_category,
        select_treatment,
        select_date,
        select_time,
        set_notes,
        set_apply_loyalty,
        set_step,
        go_to_confirm,
        go_back,
        submit,
        reset,
    };

    UseBookingResult {
        state: booking.flow.clone(),
        actions,
    }
}
