use shared::{BookingStep, TreatmentCategory};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::booking_confirm::BookingConfirm;
use super::booking_details::BookingDetails;
use super::booking_success::BookingSuccess;
use super::calendar_view::CalendarView;
use super::time_slot_grid::TimeSlotGrid;
use super::treatment_selector::TreatmentSelector;
use crate::hooks::use_availability::use_availability;
use crate::hooks::use_booking::use_booking;
use crate::hooks::use_loyalty_status::use_loyalty_status;
use crate::hooks::use_service_preselection::use_service_preselection;
use crate::hooks::use_treatments::use_treatments;
use crate::services::api::ApiClient;
use crate::services::date_utils::{max_booking_date, today};
use crate::services::location::query_param;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct BookingPageProps {
    pub api_client: ApiClient,
}

const STEPS: [BookingStep; 4] = [
    BookingStep::Service,
    BookingStep::DateTime,
    BookingStep::Details,
    BookingStep::Confirm,
];

#[function_component(BookingPage)]
pub fn booking_page(props: &BookingPageProps) -> Html {
    let booking = use_booking(&props.api_client);
    let preselection = use_service_preselection();
    let treatments = use_treatments(&props.api_client, None);
    let loyalty = use_loyalty_status(&props.api_client);

    let flow = &booking.state;
    let state = flow.state();
    let availability = use_availability(
        &props.api_client,
        state.selected_treatment.clone(),
        state.selected_date,
    );

    // Apply the `?service=` preselection once the catalog is loaded
    {
        let preselection = preselection.clone();
        let actions = booking.actions.clone();
        let loaded = !treatments.state.loading;
        let catalog = treatments.state.treatments.clone();
        use_effect_with(loaded, move |loaded| {
            if *loaded && preselection.is_valid {
                if let Some(category) = preselection.category.and_then(TreatmentCategory::from_slug) {
                    actions.select_category.emit(category);
                }
                if let Some(treatment) = preselection.unique_match(&catalog) {
                    Logger::info_with_component(
                        "BookingPage",
                        &format!("Preselected treatment '{}'", treatment.slug),
                    );
                    actions.select_treatment.emit(treatment.clone());
                }
            }
            || ()
        });
    }

    // `?treatment=<slug>` deep links straight to one treatment
    {
        let actions = booking.actions.clone();
        use_effect_with(props.api_client.clone(), move |api_client| {
            if let Some(slug) = query_param("treatment") {
                let api_client = api_client.clone();
                spawn_local(async move {
                    match api_client.get_treatment_by_slug(&slug).await {
                        Ok(treatment) => {
                            Logger::info_with_component(
                                "BookingPage",
                                &format!("Opened treatment '{}' from link", treatment.slug),
                            );
                            actions.select_treatment.emit(treatment);
                        }
                        Err(e) => Logger::warn_with_component(
                            "BookingPage",
                            &format!("Linked treatment '{}' not found: {}", slug, e),
                        ),
                    }
                });
            }
            || ()
        });
    }

    let on_back = {
        let go_back = booking.actions.go_back.clone();
        Callback::from(move |_: MouseEvent| go_back.emit(()))
    };

    let today = today();
    let step = flow.step();

    let progress = html! {
        <ol class="booking-progress">
            {for STEPS.iter().map(|s| {
                let target = *s;
                let mut class = classes!("progress-step");
                let onclick = if target == step {
                    class.push("active");
                    None
                } else if target.number() < step.number() {
                    class.push("done");
                    let set_step = booking.actions.set_step.clone();
                    Some(Callback::from(move |_: MouseEvent| set_step.emit(target)))
                } else {
                    None
                };
                html! {
                    <li class={class} {onclick}>
                        <span class="progress-number">{s.number()}</span>
                        <span class="progress-title">{s.title()}</span>
                    </li>
                }
            })}
        </ol>
    };

    let body = match step {
        BookingStep::Service => html! {
            <TreatmentSelector
                treatments={treatments.state.treatments.clone()}
                loading={treatments.state.loading}
                error={treatments.state.error.clone()}
                selected_category={state.selected_category}
                selected_treatment_id={state.selected_treatment.as_ref().map(|t| t.id)}
                preselection={preselection.clone()}
                on_select_category={booking.actions.select_category.clone()}
                on_select={booking.actions.select_treatment.clone()}
                on_retry={treatments.actions.refresh.clone()}
            />
        },
        BookingStep::DateTime => html! {
            <div class="booking-datetime">
                <CalendarView
                    today={today}
                    available_days={availability.state.available_days.clone()}
                    selected={state.selected_date}
                    min_date={Some(today)}
                    max_date={max_booking_date(today)}
                    on_select={booking.actions.select_date.clone()}
                />
                {if state.selected_date.is_some() {
                    html! {
                        <TimeSlotGrid
                            slots={availability.state.slots.clone()}
                            selected_time={state.selected_time.clone()}
                            loading={availability.state.loading_slots}
                            using_fallback={availability.state.using_fallback}
                            on_select={booking.actions.select_time.clone()}
                        />
                    }
                } else {
                    html! { <p class="slot-hint">{"Wähle zuerst einen Tag aus."}</p> }
                }}
                {for availability.state.error.as_ref().map(|error| html! { <p class="form-error">{error}</p> })}
                <div class="booking-actions">
                    <button class="button button-secondary" onclick={on_back}>{"Zurück"}</button>
                </div>
            </div>
        },
        BookingStep::Details => html! {
            <BookingDetails
                state={state.clone()}
                loyalty={loyalty.state.status.clone()}
                error={flow.error().map(str::to_string)}
                on_notes_change={booking.actions.set_notes.clone()}
                on_toggle_loyalty={booking.actions.set_apply_loyalty.clone()}
                on_continue={booking.actions.go_to_confirm.clone()}
                on_back={booking.actions.go_back.clone()}
            />
        },
        BookingStep::Confirm => html! {
            <BookingConfirm
                state={state.clone()}
                is_submitting={flow.is_submitting()}
                error={flow.error().map(str::to_string)}
                on_confirm={booking.actions.submit.clone()}
                on_back={booking.actions.go_back.clone()}
            />
        },
        BookingStep::Success => html! {
            <BookingSuccess
                appointment={flow.booked_appointment().cloned()}
                state={state.clone()}
                on_reset={booking.actions.reset.clone()}
            />
        },
    };

    html! {
        <main class="booking-page">
            <div class="container">
                <h1 class="page-title">{"Online-Buchung"}</h1>
                {if step == BookingStep::Success { html! {} } else { progress }}
                <section class="booking-step">
                    <h2 class="step-title">{step.title()}</h2>
                    {body}
                </section>
            </div>
        </main>
    }
}
