use shared::calendar::format_warm_date;
use shared::{Appointment, BookingState};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingSuccessProps {
    pub appointment: Option<Appointment>,
    pub state: BookingState,
    pub on_reset: Callback<()>,
}

#[function_component(BookingSuccess)]
pub fn booking_success(props: &BookingSuccessProps) -> Html {
    let on_reset = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| on_reset.emit(()))
    };

    let when = props
        .state
        .selected_date
        .map(|date| {
            format!(
                "{} um {} Uhr",
                format_warm_date(date),
                props.state.selected_time.clone().unwrap_or_default()
            )
        })
        .unwrap_or_default();

    html! {
        <div class="booking-success">
            <h2 class="success-title">{"Vielen Dank für deine Buchung!"}</h2>
            {for props.appointment.as_ref().map(|appointment| html! {
                <p class="success-text">
                    {format!("{}: {}", appointment.treatment_name, when)}
                    <span class={classes!("status-badge", format!("{:?}", appointment.status).to_lowercase())}>
                        {appointment.status.label()}
                    </span>
                </p>
            })}
            <p class="success-text">
                {"Du erhältst eine Bestätigung per E-Mail, sobald dein Termin bestätigt ist."}
            </p>
            <div class="booking-actions">
                <a class="button button-secondary" href="/mein-bereich">{"Meine Termine"}</a>
                <button class="button button-primary" onclick={on_reset}>{"Weiteren Termin buchen"}</button>
            </div>
        </div>
    }
}
