use shared::{DisplaySlot, PartitionedSlots};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeSlotGridProps {
    pub slots: PartitionedSlots,
    pub selected_time: Option<String>,
    pub loading: bool,
    pub using_fallback: bool,
    pub on_select: Callback<String>,
}

fn slot_column(
    title: &str,
    slots: &[DisplaySlot],
    selected_time: Option<&str>,
    on_select: &Callback<String>,
) -> Html {
    if slots.is_empty() {
        return html! {};
    }

    html! {
        <div class="slot-column">
            <h4 class="slot-column-title">{title}</h4>
            <div class="slot-buttons">
                {for slots.iter().map(|slot| {
                    let mut class = classes!("slot-button");
                    if !slot.available {
                        class.push("unavailable");
                    }
                    if selected_time == Some(slot.time.as_str()) {
                        class.push("selected");
                    }
                    let on_select = on_select.clone();
                    let time = slot.time.clone();
                    html! {
                        <button
                            class={class}
                            disabled={!slot.available}
                            onclick={Callback::from(move |_: MouseEvent| on_select.emit(time.clone()))}
                        >
                            {&slot.time}
                        </button>
                    }
                })}
            </div>
        </div>
    }
}

#[function_component(TimeSlotGrid)]
pub fn time_slot_grid(props: &TimeSlotGridProps) -> Html {
    if props.loading {
        return html! {
            <div class="time-slot-grid loading">
                <div class="spinner" aria-label="Zeiten werden geladen" />
            </div>
        };
    }

    if props.slots.available_count() == 0 {
        return html! {
            <div class="time-slot-grid">
                <p class="empty-state">{"An diesem Tag ist leider nichts mehr frei."}</p>
            </div>
        };
    }

    let selected = props.selected_time.as_deref();

    html! {
        <div class="time-slot-grid">
            {if props.using_fallback {
                html! {
                    <p class="slot-hint">
                        {"Die Verfügbarkeit konnte nicht live geprüft werden. Wir bestätigen deinen Termin persönlich."}
                    </p>
                }
            } else {
                html! {}
            }}
            {slot_column("Vormittag", &props.slots.morning, selected, &props.on_select)}
            {slot_column("Nachmittag", &props.slots.afternoon, selected, &props.on_select)}
        </div>
    }
}
