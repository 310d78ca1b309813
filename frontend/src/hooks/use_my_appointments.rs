use shared::api::{past_appointments, upcoming_appointments};
use shared::Appointment;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::now_local;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct AppointmentsState {
    /// Active and still ahead, soonest first
    pub upcoming: Vec<Appointment>,
    /// Over or closed, newest first
    pub past: Vec<Appointment>,
    pub loading: bool,
    /// Appointment whose cancellation is in flight
    pub cancelling: Option<i64>,
    pub error: Option<String>,
}

pub struct UseMyAppointmentsResult {
    pub state: AppointmentsState,
    pub actions: UseMyAppointmentsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseMyAppointmentsActions {
    pub refresh: Callback<()>,
    pub cancel: Callback<i64>,
}

#[hook]
pub fn use_my_appointments(api_client: &ApiClient) -> UseMyAppointmentsResult {
    let appointments = use_state(Vec::<Appointment>::new);
    let loading = use_state(|| true);
    let cancelling = use_state(|| None::<i64>);
    let error = use_state(|| None::<String>);

    let refresh = {
        let appointments = appointments.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_callback(api_client.clone(), move |_: (), api_client| {
            let api_client = api_client.clone();
            let appointments = appointments.clone();
            let loading = loading.clone();
            let error = error.clone();
            spawn_local(async move {
                loading.set(true);
                match api_client.get_my_appointments().await {
                    Ok(list) => {
                        appointments.set(list);
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_my_appointments",
                            &format!("Failed to fetch appointments: {}", e),
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

    let cancel = {
        let cancelling = cancelling.clone();
        let error = error.clone();
        let refresh = refresh.clone();
        use_callback(api_client.clone(), move |appointment_id: i64, api_client| {
            let api_client = api_client.clone();
            let cancelling = cancelling.clone();
            let error = error.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                cancelling.set(Some(appointment_id));
                match api_client.cancel_appointment(appointment_id).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            "use_my_appointments",
                            &format!("Cancelled appointment {}", appointment_id),
                        );
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_my_appointments",
                            &format!("Failed to cancel appointment {}: {}", appointment_id, e),
                        );
                        error.set(Some(e.user_message()));
                    }
                }
                cancelling.set(None);
            });
        })
    };

    let now = now_local();
    let state = AppointmentsState {
        upcoming: upcoming_appointments(&appointments, now),
        past: past_appointments(&appointments, now),
        loading: *loading,
        cancelling: *cancelling,
        error: (*error).clone(),
    };

    UseMyAppointmentsResult {
        state,
        actions: UseMyAppointmentsActions { refresh, cancel },
    }
}
