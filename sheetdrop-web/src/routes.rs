use crate::{
    components::loading::Loading,
    containers::layout::Layout,
    models::app_state::AppState,
    pages::{ErrorPage, ImportPage, LoginPage, RegisterPage, UsersPage},
};
use shared::models::UserRole;
use strum::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The main routes.
#[derive(Debug, Clone, PartialEq, Eq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// What the guard does with a protected view for a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Boot check still running: render a neutral placeholder, decide later.
    Wait,
    /// Nobody is signed in.
    RedirectLogin,
    /// Signed in but missing the required role: back to the default view,
    /// not to login.
    RedirectHome,
    Allow,
}

/// Pure gating rule; the [`RouteGuard`] component just applies it.
#[must_use]
pub fn guard_decision(
    loading: bool,
    role: Option<UserRole>,
    required_role: Option<UserRole>,
) -> GuardDecision {
    if loading {
        return GuardDecision::Wait;
    }
    let Some(role) = role else {
        return GuardDecision::RedirectLogin;
    };
    match required_role {
        Some(required) if role != required => GuardDecision::RedirectHome,
        _ => GuardDecision::Allow,
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps {
    pub children: Html,
    #[prop_or_default]
    pub required_role: Option<UserRole>,
}

/// Gates rendering of protected views on session state. Holds no state of
/// its own.
#[function_component(RouteGuard)]
pub fn route_guard(props: &RouteGuardProps) -> Html {
    let state = use_selector(|state: &AppState| (state.loading, state.user.clone()));
    let (loading, user) = (*state).clone();

    match guard_decision(loading, user.map(|user| user.role), props.required_role) {
        GuardDecision::Wait => html! { <Loading /> },
        GuardDecision::RedirectLogin => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        GuardDecision::RedirectHome => html! { <Redirect<MainRoute> to={MainRoute::Home} /> },
        GuardDecision::Allow => props.children.clone(),
    }
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
    pub on_logout: Callback<()>,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let state = use_selector(|state: &AppState| (state.loading, state.user.is_some()));
    let (loading, is_authenticated) = *state;
    let on_logout = props.on_logout.clone();

    if loading {
        return html! { <Loading /> };
    }

    match props.route.clone() {
        MainRoute::Login => {
            if is_authenticated {
                html! { <Redirect<MainRoute> to={MainRoute::Home} /> }
            } else {
                html! { <LoginPage /> }
            }
        }
        MainRoute::Register => {
            if is_authenticated {
                html! { <Redirect<MainRoute> to={MainRoute::Home} /> }
            } else {
                html! { <RegisterPage /> }
            }
        }
        MainRoute::Home => html! {
            <RouteGuard>
                <Layout current_route={MainRoute::Home} on_logout={Some(on_logout)}>
                    <ImportPage />
                </Layout>
            </RouteGuard>
        },
        MainRoute::Users => html! {
            <RouteGuard required_role={UserRole::Admin}>
                <Layout current_route={MainRoute::Users} on_logout={Some(on_logout)}>
                    <UsersPage />
                </Layout>
            </RouteGuard>
        },
        MainRoute::NotFound => html! {
            <RouteGuard>
                <Layout current_route={MainRoute::NotFound} on_logout={Some(on_logout)}>
                    <ErrorPage />
                </Layout>
            </RouteGuard>
        },
    }
}

/// Switch function for the main routes.
pub fn switch_with_logout(route: MainRoute, on_logout: Callback<()>) -> Html {
    html! { <MainRouteView {route} {on_logout} /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_waits_while_loading() {
        // No redirect decision before the boot check resolves, even with a
        // role requirement in play.
        assert_eq!(guard_decision(true, None, None), GuardDecision::Wait);
        assert_eq!(
            guard_decision(true, Some(UserRole::User), Some(UserRole::Admin)),
            GuardDecision::Wait
        );
    }

    #[test]
    fn test_guard_sends_anonymous_to_login() {
        assert_eq!(guard_decision(false, None, None), GuardDecision::RedirectLogin);
        assert_eq!(
            guard_decision(false, None, Some(UserRole::Admin)),
            GuardDecision::RedirectLogin
        );
    }

    #[test]
    fn test_guard_sends_underprivileged_home_not_to_login() {
        assert_eq!(
            guard_decision(false, Some(UserRole::User), Some(UserRole::Admin)),
            GuardDecision::RedirectHome
        );
    }

    #[test]
    fn test_guard_allows_matching_or_absent_requirement() {
        assert_eq!(
            guard_decision(false, Some(UserRole::Admin), Some(UserRole::Admin)),
            GuardDecision::Allow
        );
        assert_eq!(
            guard_decision(false, Some(UserRole::User), None),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(MainRoute::Home.to_path(), "/");
        assert_eq!(MainRoute::Login.to_path(), "/login");
        assert_eq!(MainRoute::Register.to_path(), "/register");
        assert_eq!(MainRoute::Users.to_path(), "/users");
        assert_eq!(MainRoute::NotFound.to_path(), "/404");
    }

    #[test]
    fn test_route_equality() {
        assert_eq!(MainRoute::Home, MainRoute::Home);
        assert_ne!(MainRoute::Home, MainRoute::Users);
    }
}
