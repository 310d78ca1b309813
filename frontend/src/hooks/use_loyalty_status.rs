use shared::LoyaltyStatus;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session_store::SessionStore;

#[derive(Clone, PartialEq)]
pub struct LoyaltyState {
    pub status: Option<LoyaltyStatus>,
    pub redeeming: bool,
    pub error: Option<String>,
}

pub struct UseLoyaltyStatusResult {
    pub state: LoyaltyState,
    pub actions: UseLoyaltyStatusActions,
}

#[derive(Clone, PartialEq)]
pub struct UseLoyaltyStatusActions {
    pub redeem: Callback<()>,
}

/// Stamp card of the signed-in customer; stays empty for guests
#[hook]
pub fn use_loyalty_status(api_client: &ApiClient) -> UseLoyaltyStatusResult {
    let status = use_state(|| Option::<LoyaltyStatus>::None);
    let redeeming = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let status = status.clone();
        use_effect_with(api_client.clone(), move |api_client| {
            if SessionStore::access_token().is_some() {
                let api_client = api_client.clone();
                spawn_local(async move {
                    match api_client.get_loyalty_status().await {
                        Ok(loaded) => status.set(Some(loaded)),
                        Err(e) => Logger::debug_with_component(
                            "use_loyalty_status",
                            &format!("Loyalty status unavailable: {}", e),
                        ),
                    }
                });
            }
            || ()
        });
    }

    let redeem = {
        let status = status.clone();
        let redeeming = redeeming.clone();
        let error = error.clone();
        use_callback(api_client.clone(), move |_: (), api_client| {
            let api_client = api_client.clone();
            let status = status.clone();
            let redeeming = redeeming.clone();
            let error = error.clone();
            spawn_local(async move {
                redeeming.set(true);
                error.set(None);
                match api_client.redeem_loyalty_reward().await {
                    Ok(updated) => {
                        Logger::info_with_component("use_loyalty_status", "Loyalty reward redeemed");
                        status.set(Some(updated));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_loyalty_status",
                            &format!("Failed to redeem reward: {}", e),
                        );
                        error.set(Some(e.user_message()));
                    }
                }
                redeeming.set(false);
            });
        })
    };

    UseLoyaltyStatusResult {
        state: LoyaltyState {
            status: (*status).clone(),
            redeeming: *redeeming,
            error: (*error).clone(),
        },
        actions: UseLoyaltyStatusActions { redeem },
    }
}
