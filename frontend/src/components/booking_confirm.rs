use shared::booking::whatsapp_message;
use shared::calendar::format_warm_date;
use shared::BookingState;
use web_sys::MouseEvent;
use yew::prelude::*;

const WHATSAPP_NUMBER: &str = "4915259675346";

#[derive(Properties, PartialEq)]
pub struct BookingConfirmProps {
    pub state: BookingState,
    pub is_submitting: bool,
    pub error: Option<String>,
    pub on_confirm: Callback<()>,
    pub on_back: Callback<()>,
}

fn whatsapp_link(state: &BookingState) -> Option<String> {
    let message = whatsapp_message(state)?;
    let encoded = js_sys::encode_uri_component(&message);
    Some(format!("https://wa.me/{}?text={}", WHATSAPP_NUMBER, String::from(encoded)))
}

#[function_component(BookingConfirm)]
pub fn booking_confirm(props: &BookingConfirmProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let state = &props.state;
    let rows = state.selected_treatment.as_ref().map(|treatment| {
        html! {
            <dl class="confirm-rows">
                <dt>{"Behandlung"}</dt>
                <dd>{&treatment.name}</dd>
                <dt>{"Datum"}</dt>
                <dd>{state.selected_date.map(format_warm_date).unwrap_or_default()}</dd>
                <dt>{"Uhrzeit"}</dt>
                <dd>{format!("{} Uhr", state.selected_time.clone().unwrap_or_default())}</dd>
                <dt>{"Dauer"}</dt>
                <dd>{treatment.formatted_duration()}</dd>
                <dt>{"Preis"}</dt>
                <dd>{treatment.formatted_price()}</dd>
                {if state.customer_notes.trim().is_empty() {
                    html! {}
                } else {
                    html! {
                        <>
                            <dt>{"Anmerkungen"}</dt>
                            <dd>{state.customer_notes.trim()}</dd>
                        </>
                    }
                }}
                {if state.apply_loyalty_reward {
                    html! {
                        <>
                            <dt>{"Treuebonus"}</dt>
                            <dd>{"wird eingelöst"}</dd>
                        </>
                    }
                } else {
                    html! {}
                }}
            </dl>
        }
    });

    html! {
        <div class="booking-confirm">
            {for rows}

            {for props.error.as_ref().map(|error| html! { <p class="form-error">{error}</p> })}

            <div class="booking-actions">
                <button
                    class="button button-secondary"
                    disabled={props.is_submitting}
                    onclick={on_back}
                >
                    {"Zurück"}
                </button>
                <button
                    class="button button-primary"
                    disabled={props.is_submitting}
                    onclick={on_confirm}
                >
                    {if props.is_submitting { "Wird gebucht..." } else { "Verbindlich buchen" }}
                </button>
            </div>

            {for whatsapp_link(state).map(|href| html! {
                <a class="whatsapp-link" href={href} target="_blank" rel="noopener noreferrer">
                    {"Lieber per WhatsApp anfragen"}
                </a>
            })}
        </div>
    }
}
