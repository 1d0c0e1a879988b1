use yew::{Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

use crate::routes::MainRoute;

#[derive(Properties, PartialEq, Eq)]
pub struct HeaderNavItemProps {
    pub route: MainRoute,
    pub current_route: Option<MainRoute>,
}

#[function_component(HeaderNavItem)]
pub fn header_nav_item(props: &HeaderNavItemProps) -> Html {
    let (label, icon) = match props.route {
        MainRoute::Home => ("Import", IconId::HeroiconsOutlineArrowUpTray),
        MainRoute::Users => ("Users", IconId::HeroiconsOutlineUsers),
        MainRoute::Login => ("Sign in", IconId::HeroiconsOutlineArrowRightOnRectangle),
        MainRoute::Register => ("Register", IconId::HeroiconsOutlineUserPlus),
        MainRoute::NotFound => ("Not found", IconId::HeroiconsOutlineQuestionMarkCircle),
    };

    let active_class = if props.current_route.as_ref() == Some(&props.route) {
        "btn-soft"
    } else {
        ""
    };

    html! {
        <li>
            <Link<MainRoute>
                to={props.route.clone()}
                classes={classes!("btn", "btn-ghost", "gap-2", active_class)}
            >
                <Icon icon_id={icon} width="1em" height="1em" />
                {label}
            </Link<MainRoute>>
        </li>
    }
}
