use shared::service_mapping::resolve_preselection;
use shared::ServicePreselection;
use yew::prelude::*;

use crate::services::location::query_param;
use crate::services::logging::Logger;

/// Reads `?service=` once on mount
#[hook]
pub fn use_service_preselection() -> ServicePreselection {
    let preselection = use_memo((), |_| {
        let param = query_param("service");
        let preselection = resolve_preselection(param.as_deref());
        if let (Some(param), false) = (param.as_deref(), preselection.is_valid) {
            Logger::warn_with_component(
                "use_service_preselection",
                &format!("Ignoring unknown service parameter '{}'", param),
            );
        }
        preselection
    });

    (*preselection).clone()
}
