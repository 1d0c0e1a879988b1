use wasm_bindgen_futures::spawn_local;
use yew::{Callback, ContextProvider, Html, function_component, html, use_effect_with, use_memo};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use crate::session::AuthController;

#[function_component(App)]
pub fn app() -> Html {
    let (_state, dispatch) = use_store::<AppState>();
    let client = use_memo((), |_| ApiClient::new(&AppConfig::new().api_base_url));

    // Resolve any persisted session exactly once, before the guard makes
    // its first real decision.
    {
        let controller = AuthController::new((*client).clone(), dispatch.clone());
        use_effect_with((), move |_| {
            spawn_local(async move {
                controller.boot().await;
            });
            || ()
        });
    }

    let logout_callback = {
        let controller = AuthController::new((*client).clone(), dispatch);
        Callback::from(move |()| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.logout().await;
            });
        })
    };

    html! {
        <ContextProvider<ApiClient> context={(*client).clone()}>
            <BrowserRouter>
                <Switch<MainRoute>
                    render={move |route| crate::routes::switch_with_logout(route, logout_callback.clone())}
                />
            </BrowserRouter>
        </ContextProvider<ApiClient>>
    }
}
