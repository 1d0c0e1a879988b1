use strum::IntoEnumIterator;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

use crate::{
    components::{header_nav_item::HeaderNavItem, user_dropdown::UserDropdown},
    models::app_state::AppState,
    routes::MainRoute,
};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<MainRoute>,
    #[prop_or_default]
    pub on_logout: Option<Callback<()>>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let is_admin = user.as_ref().as_ref().is_some_and(|user| user.is_admin());

    // Auth and error routes never appear in the nav; the users page only
    // shows up for admins.
    let nav_routes: Vec<MainRoute> = MainRoute::iter()
        .filter(|route| match route {
            MainRoute::Home => true,
            MainRoute::Users => is_admin,
            MainRoute::Login | MainRoute::Register | MainRoute::NotFound => false,
        })
        .collect();

    html! {
        <nav class="navbar justify-between bg-base-300">
            <a class="btn btn-ghost text-lg">
                <Link<MainRoute> to={MainRoute::Home} classes="text-lg">
                    {"SheetDrop"}
                </Link<MainRoute>>
            </a>
            <ul class="menu menu-horizontal gap-2">
                { for nav_routes.into_iter().map(|route| html! {
                    <HeaderNavItem {route} current_route={props.current_route.clone()} />
                }) }
            </ul>
            <UserDropdown on_logout={props.on_logout.clone()} />
        </nav>
    }
}
