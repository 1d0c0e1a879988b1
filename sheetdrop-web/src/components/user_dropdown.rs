use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

use crate::{models::app_state::AppState, routes::MainRoute};

#[derive(Properties, PartialEq)]
pub struct UserDropdownProps {
    #[prop_or_default]
    pub on_logout: Option<Callback<()>>,
}

#[function_component(UserDropdown)]
pub fn user_dropdown(props: &UserDropdownProps) -> Html {
    let navigator = use_navigator();
    let user_state = use_selector(|state: &AppState| state.user.clone());
    let Some(user) = (*user_state).clone() else {
        return html! {};
    };

    let logout_button = {
        let on_logout = props.on_logout.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            if let Some(callback) = on_logout.clone() {
                callback.emit(());
            }
            if let Some(navigator) = navigator.clone() {
                navigator.push(&MainRoute::Login);
            }
        });
        html! {
            <li><a {onclick}>{"Sign out"}</a></li>
        }
    };

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                <Icon icon_id={IconId::HeroiconsOutlineUserCircle} width="1.5em" height="1.5em" />
            </div>
            <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                <li class="px-2 py-1 text-left">
                    <div class="text-sm font-semibold text-base-content">{&user.name}</div>
                    <div class="text-xs text-base-content/70">{&user.email}</div>
                    <div class="text-xs text-base-content/50">{user.role.to_string()}</div>
                </li>
                <div class="divider my-0"></div>
                {logout_button}
            </ul>
        </div>
    }
}
