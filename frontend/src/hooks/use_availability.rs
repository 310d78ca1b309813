use chrono::NaiveDate;
use shared::availability::{
    default_weekly_availability, fallback_slots, next_available_days, DEFAULT_VISIBLE_DAYS,
};
use shared::time_slots::{partition_backend_slots, partition_slots};
use shared::{PartitionedSlots, Treatment, WeeklyAvailability};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::date_utils::today;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct AvailabilityState {
    pub weekly: Vec<WeeklyAvailability>,
    /// Open days highlighted in the calendar
    pub available_days: Vec<NaiveDate>,
    pub slots: PartitionedSlots,
    pub loading_slots: bool,
    /// Slots were derived from opening hours because the slot endpoint failed
    pub using_fallback: bool,
    pub error: Option<String>,
}

pub struct UseAvailabilityResult {
    pub state: AvailabilityState,
}

#[hook]
pub fn use_availability(
    api_client: &ApiClient,
    treatment: Option<Treatment>,
    date: Option<NaiveDate>,
) -> UseAvailabilityResult {
    let weekly = use_state(default_weekly_availability);
    let slots = use_state(PartitionedSlots::default);
    let loading_slots = use_state(|| false);
    let using_fallback = use_state(|| false);
    let error = use_state(|| None::<String>);

    // Opening hours, once per page load
    {
        let weekly = weekly.clone();
        use_effect_with(api_client.clone(), move |api_client| {
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.get_weekly_availability().await {
                    Ok(list) if !list.is_empty() => weekly.set(list),
                    Ok(_) => Logger::warn_with_component(
                        "use_availability",
                        "Backend returned no opening hours, keeping defaults",
                    ),
                    Err(e) => Logger::warn_with_component(
                        "use_availability",
                        &format!("Weekly availability unavailable, using defaults: {}", e),
                    ),
                }
            });
            || ()
        });
    }

    // Slots for the chosen treatment and day
    {
        let weekly = weekly.clone();
        let slots = slots.clone();
        let loading_slots = loading_slots.clone();
        let using_fallback = using_fallback.clone();
        let error = error.clone();

        use_effect_with((treatment, date, api_client.clone()), move |(treatment, date, api_client)| {
            let api_client = api_client.clone();
            let (Some(treatment), Some(date)) = (treatment.clone(), *date) else {
                slots.set(PartitionedSlots::default());
                using_fallback.set(false);
                return;
            };

            spawn_local(async move {
                loading_slots.set(true);
                error.set(None);

                match api_client.get_slots(treatment.id, date).await {
                    Ok(response) => {
                        slots.set(partition_backend_slots(&response.slots));
                        using_fallback.set(false);
                    }
                    Err(ApiError::Unauthorized) => {
                        slots.set(PartitionedSlots::default());
                        error.set(Some(ApiError::Unauthorized.user_message()));
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "use_availability",
                            &format!("Slot lookup failed, falling back to opening hours: {}", e),
                        );
                        let generated = fallback_slots(&weekly, date, treatment.duration_minutes);
                        slots.set(partition_slots(generated));
                        using_fallback.set(true);
                    }
                }

                loading_slots.set(false);
            });
        });
    }

    let available_days = next_available_days(&weekly, today(), DEFAULT_VISIBLE_DAYS);

    let state = AvailabilityState {
        weekly: (*weekly).clone(),
        available_days,
        slots: (*slots).clone(),
        loading_slots: *loading_slots,
        using_fallback: *using_fallback,
        error: (*error).clone(),
    };

    UseAvailabilityResult { state }
}
