use shared::calendar::format_warm_date;
use shared::{BookingState, LoyaltyStatus};
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingDetailsProps {
    pub state: BookingState,
    pub loyalty: Option<LoyaltyStatus>,
    pub error: Option<String>,
    pub on_notes_change: Callback<String>,
    pub on_toggle_loyalty: Callback<bool>,
    pub on_continue: Callback<()>,
    pub on_back: Callback<()>,
}

#[function_component(BookingDetails)]
pub fn booking_details(props: &BookingDetailsProps) -> Html {
    let on_notes_input = {
        let on_notes_change = props.on_notes_change.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            on_notes_change.emit(textarea.value());
        })
    };

    let on_loyalty_change = {
        let on_toggle_loyalty = props.on_toggle_loyalty.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_toggle_loyalty.emit(input.checked());
        })
    };

    let on_continue = {
        let on_continue = props.on_continue.clone();
        Callback::from(move |_: MouseEvent| on_continue.emit(()))
    };

    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let summary = match (&props.state.selected_treatment, props.state.selected_date) {
        (Some(treatment), Some(date)) => html! {
            <div class="booking-summary">
                <div class="summary-treatment">{&treatment.name}</div>
                <div class="summary-when">
                    {format!(
                        "{} um {} Uhr",
                        format_warm_date(date),
                        props.state.selected_time.clone().unwrap_or_default()
                    )}
                </div>
            </div>
        },
        _ => html! {},
    };

    html! {
        <div class="booking-details">
            {summary}

            <div class="form-group">
                <label for="customer-notes" class="form-label">{"Anmerkungen (optional)"}</label>
                <textarea
                    id="customer-notes"
                    class="form-input"
                    rows="4"
                    placeholder="Allergien, Wünsche oder Fragen"
                    value={props.state.customer_notes.clone()}
                    oninput={on_notes_input}
                />
            </div>

            {match &props.loyalty {
                Some(loyalty) if loyalty.reward_available => html! {
                    <label class="loyalty-option">
                        <input
                            type="checkbox"
                            checked={props.state.apply_loyalty_reward}
                            onchange={on_loyalty_change}
                        />
                        {format!(" Treuebonus einlösen ({:.0} € Rabatt)", loyalty.reward_discount)}
                    </label>
                },
                Some(loyalty) => html! {
                    <p class="loyalty-progress">
                        {format!("Noch {} Stempel bis zu deinem Treuebonus.", loyalty.stamps_to_next_reward)}
                    </p>
                },
                None => html! {},
            }}

            {for props.error.as_ref().map(|error| html! { <p class="form-error">{error}</p> })}

            <div class="booking-actions">
                <button class="button button-secondary" onclick={on_back}>{"Zurück"}</button>
                <button class="button button-primary" onclick={on_continue}>{"Weiter"}</button>
            </div>
        </div>
    }
}
