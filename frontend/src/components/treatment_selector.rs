use shared::api::treatments_by_category;
use shared::{ServicePreselection, Treatment, TreatmentCategory};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TreatmentSelectorProps {
    pub treatments: Vec<Treatment>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_category: Option<TreatmentCategory>,
    pub selected_treatment_id: Option<i64>,
    pub preselection: ServicePreselection,
    pub on_select_category: Callback<TreatmentCategory>,
    pub on_select: Callback<Treatment>,
    pub on_retry: Callback<()>,
}

#[function_component(TreatmentSelector)]
pub fn treatment_selector(props: &TreatmentSelectorProps) -> Html {
    if props.loading {
        return html! {
            <div class="treatment-selector loading">
                <div class="spinner" aria-label="Behandlungen werden geladen" />
            </div>
        };
    }

    if let Some(error) = &props.error {
        let on_retry = props.on_retry.clone();
        return html! {
            <div class="treatment-selector">
                <p class="form-error">{error}</p>
                <button
                    class="button button-secondary"
                    onclick={Callback::from(move |_: MouseEvent| on_retry.emit(()))}
                >
                    {"Erneut versuchen"}
                </button>
            </div>
        };
    }

    let grouped = treatments_by_category(&props.treatments);
    let active_category = props
        .selected_category
        .filter(|category| grouped.contains_key(category))
        .or_else(|| grouped.keys().next().copied());

    let tabs = grouped.keys().map(|category| {
        let category = *category;
        let on_select_category = props.on_select_category.clone();
        let class = if Some(category) == active_category {
            "category-tab active"
        } else {
            "category-tab"
        };
        html! {
            <button
                class={class}
                onclick={Callback::from(move |_: MouseEvent| on_select_category.emit(category))}
            >
                {category.display_name()}
            </button>
        }
    });

    let visible: Vec<Treatment> = active_category
        .and_then(|category| grouped.get(&category).cloned())
        .unwrap_or_default();

    html! {
        <div class="treatment-selector">
            {if props.preselection.is_valid {
                html! {
                    <div class="preselection-hint">
                        <strong>{props.preselection.display_name.unwrap_or_default()}</strong>
                        {for props.preselection.description.map(|d| html! { <span>{format!(" · {}", d)}</span> })}
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="category-tabs">{for tabs}</div>

            {if visible.is_empty() {
                html! { <p class="empty-state">{"Aktuell sind keine Behandlungen buchbar."}</p> }
            } else {
                html! {
                    <ul class="treatment-list">
                        {for visible.into_iter().map(|treatment| {
                            let mut class = classes!("treatment-card");
                            if props.selected_treatment_id == Some(treatment.id) {
                                class.push("selected");
                            }
                            if props.preselection.matches_treatment(&treatment) {
                                class.push("recommended");
                            }
                            let on_select = props.on_select.clone();
                            let chosen = treatment.clone();
                            html! {
                                <li
                                    class={class}
                                    onclick={Callback::from(move |_: MouseEvent| on_select.emit(chosen.clone()))}
                                >
                                    <div class="treatment-name">{&treatment.name}</div>
                                    <div class="treatment-description">{&treatment.description}</div>
                                    <div class="treatment-meta">
                                        <span>{treatment.formatted_duration()}</span>
                                        <span class="treatment-price">{treatment.formatted_price()}</span>
                                    </div>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </div>
    }
}
