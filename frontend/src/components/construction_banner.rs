use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConstructionBannerProps {
    pub visible: bool,
}

#[function_component(ConstructionBanner)]
pub fn construction_banner(props: &ConstructionBannerProps) -> Html {
    if !props.visible {
        return html! {};
    }

    html! {
        <div class="construction-banner" role="status">
            <strong>{"Die Seite wird gerade überarbeitet."}</strong>
            <span>{" Online-Buchungen sind trotzdem möglich. Bei Fragen erreichst du uns per WhatsApp."}</span>
        </div>
    }
}
