use shared::User;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user: Option<User>,
    pub checking_session: bool,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <a class="brand" href="/">{"LM Beauty"}</a>
                <nav class="header-right">
                    <a class="header-link" href="/online-booking">{"Termin buchen"}</a>
                    {if props.checking_session {
                        html! { <span class="header-status">{"..."}</span> }
                    } else if let Some(user) = &props.user {
                        html! {
                            <div class="header-user">
                                <a class="header-link" href="/mein-bereich">
                                    {format!("Hallo {}", user.greeting_name())}
                                </a>
                                <button class="header-button" onclick={on_logout}>{"Abmelden"}</button>
                            </div>
                        }
                    } else {
                        html! { <a class="header-link" href="/anmelden">{"Anmelden"}</a> }
                    }}
                </nav>
            </div>
        </header>
    }
}
