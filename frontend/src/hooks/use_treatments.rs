use shared::{Treatment, TreatmentCategory};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct TreatmentsState {
    pub treatments: Vec<Treatment>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseTreatmentsResult {
    pub state: TreatmentsState,
    pub actions: UseTreatmentsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTreatmentsActions {
    pub refresh: Callback<()>,
}

/// Active treatments, optionally narrowed to one category, in the studio's sort order
#[hook]
pub fn use_treatments(api_client: &ApiClient, category: Option<TreatmentCategory>) -> UseTreatmentsResult {
    let treatments = use_state(Vec::<Treatment>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh = {
        let treatments = treatments.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((category, api_client.clone()), move |_: (), (category, api_client)| {
            let api_client = api_client.clone();
            let treatments = treatments.clone();
            let loading = loading.clone();
            let error = error.clone();
            let category = *category;

            spawn_local(async move {
                loading.set(true);

                let result = match category {
                    Some(category) => api_client.get_treatments_by_category(category).await,
                    None => api_client.get_treatments().await,
                };
                match result {
                    Ok(mut list) => {
                        list.retain(|t| t.active);
                        list.sort_by_key(|t| t.sort_order);
                        treatments.set(list);
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_treatments",
                            &format!("Failed to fetch treatments: {}", e),
                        );
                        error.set(Some(e.user_message()));
                    }
                }

                loading.set(false);
            });
        })
    };

    use_effect_with(refresh.clone(), |refresh| {
        refresh.emit(());
        || ()
    });

    let state = TreatmentsState {
        treatments: (*treatments).clone(),
        loading: *loading,
        error: (*error).clone(),
    };

    UseTreatmentsResult {
        state,
        actions: UseTreatmentsActions { refresh },
    }
}
