use shared::calendar::format_warm_date;
use shared::{Appointment, LoyaltyStatus, User};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_loyalty_status::use_loyalty_status;
use crate::hooks::use_my_appointments::use_my_appointments;
use crate::services::api::ApiClient;

/// Stamps needed for one reward
const STAMPS_PER_CARD: u32 = 10;

/// "Dienstag, 14. Mai um 10:30 Uhr", or the raw timestamp if it cannot be parsed
fn appointment_when(appointment: &Appointment) -> String {
    appointment
        .scheduled_at_local()
        .map(|at| format!("{} um {} Uhr", format_warm_date(at.date()), at.format("%H:%M")))
        .unwrap_or_else(|| appointment.scheduled_at.clone())
}

fn status_class(appointment: &Appointment) -> String {
    format!("{:?}", appointment.status).to_lowercase()
}

#[derive(Properties, PartialEq)]
pub struct AccountPageProps {
    pub api_client: ApiClient,
    pub user: Option<User>,
}

#[function_component(AccountPage)]
pub fn account_page(props: &AccountPageProps) -> Html {
    let appointments = use_my_appointments(&props.api_client);
    let loyalty = use_loyalty_status(&props.api_client);

    let Some(user) = &props.user else {
        return html! {
            <main class="account-page">
                <div class="container">
                    <p class="empty-state">{"Bitte melde dich an, um deine Termine zu sehen."}</p>
                    <a class="button button-primary" href="/anmelden?redirect=/mein-bereich">{"Anmelden"}</a>
                </div>
            </main>
        };
    };

    let stamp_card = loyalty.state.status.as_ref().map(|status| {
        stamp_card(
            status,
            loyalty.state.redeeming,
            loyalty.state.error.as_deref(),
            loyalty.actions.redeem.clone(),
        )
    });

    let state = &appointments.state;
    let lists = if state.loading && state.upcoming.is_empty() && state.past.is_empty() {
        html! { <div class="spinner" aria-label="Termine werden geladen" /> }
    } else {
        html! {
            <>
                <section class="account-section">
                    <h2>{"Kommende Termine"}</h2>
                    {if state.upcoming.is_empty() {
                        html! {
                            <p class="empty-state">
                                {"Keine anstehenden Termine. "}
                                <a href="/">{"Jetzt buchen"}</a>
                            </p>
                        }
                    } else {
                        html! {
                            <ul class="appointment-list">
                                {for state.upcoming.iter().map(|appointment| {
                                    let id = appointment.id;
                                    let cancel = appointments.actions.cancel.clone();
                                    let busy = state.cancelling == Some(id);
                                    html! {
                                        <li class="appointment-card">
                                            <div class="appointment-name">{&appointment.treatment_name}</div>
                                            <div class="appointment-when">{appointment_when(appointment)}</div>
                                            <span class={classes!("status-badge", status_class(appointment))}>
                                                {appointment.status.label()}
                                            </span>
                                            <button
                                                class="button button-secondary"
                                                disabled={state.cancelling.is_some()}
                                                onclick={Callback::from(move |_: MouseEvent| cancel.emit(id))}
                                            >
                                                {if busy { "Wird storniert..." } else { "Stornieren" }}
                                            </button>
                                        </li>
                                    }
                                })}
                            </ul>
                        }
                    }}
                </section>

                {if state.past.is_empty() {
                    html! {}
                } else {
                    html! {
                        <section class="account-section">
                            <h2>{"Vergangene Termine"}</h2>
                            <ul class="appointment-list past">
                                {for state.past.iter().map(|appointment| html! {
                                    <li class="appointment-card">
                                        <div class="appointment-name">{&appointment.treatment_name}</div>
                                        <div class="appointment-when">{appointment_when(appointment)}</div>
                                        <span class={classes!("status-badge", status_class(appointment))}>
                                            {appointment.status.label()}
                                        </span>
                                    </li>
                                })}
                            </ul>
                        </section>
                    }
                }}
            </>
        }
    };

    html! {
        <main class="account-page">
            <div class="container">
                <h1 class="page-title">{format!("Hallo {}", user.greeting_name())}</h1>
                {for state.error.as_ref().map(|error| html! { <p class="form-error">{error}</p> })}
                {for stamp_card}
                {lists}
            </div>
        </main>
    }
}

fn stamp_card(status: &LoyaltyStatus, redeeming: bool, error: Option<&str>, redeem: Callback<()>) -> Html {
    let filled = status.current_stamps.min(STAMPS_PER_CARD);
    html! {
        <section class="account-section stamp-card">
            <h2>{"Deine Stempelkarte"}</h2>
            <div class="stamps">
                {for (0..STAMPS_PER_CARD).map(|i| {
                    let class = if i < filled { "stamp filled" } else { "stamp" };
                    html! { <span class={class} /> }
                })}
            </div>
            {if status.reward_available {
                html! {
                    <button
                        class="button button-primary"
                        disabled={redeeming}
                        onclick={Callback::from(move |_: MouseEvent| redeem.emit(()))}
                    >
                        {if redeeming {
                            "Wird eingelöst...".to_string()
                        } else {
                            format!("{:.0} % Rabatt einlösen", status.reward_discount)
                        }}
                    </button>
                }
            } else {
                html! {
                    <p class="stamp-hint">
                        {format!("Noch {} Besuche bis zur nächsten Belohnung", status.stamps_to_next_reward)}
                    </p>
                }
            }}
            {for error.map(|error| html! { <p class="form-error">{error}</p> })}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn appointment(scheduled_at: &str, status: &str) -> Appointment {
        serde_json::from_value(json!({
            "id": 3,
            "customerId": 7,
            "treatmentId": 1,
            "treatmentName": "Wimpernlifting",
            "scheduledAt": scheduled_at,
            "durationMinutes": 60,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_appointment_when() {
        let when = appointment_when(&appointment("2025-05-14T10:30:00", "CONFIRMED"));
        assert!(when.ends_with("um 10:30 Uhr"));
        assert!(when.contains("14."));

        assert_eq!(appointment_when(&appointment("bald", "PENDING")), "bald");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(&appointment("2025-05-14T10:30:00", "CANCELLED")), "cancelled");
    }
}
