use shared::models::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yew_router::prelude::Link;
use yewdux::prelude::use_store;

use crate::{api::ApiClient, models::app_state::AppState, routes::MainRoute, session::AuthController};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let client = use_context::<ApiClient>().expect("ApiClient context missing");
    let (_state, dispatch) = use_store::<AppState>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    let onsubmit = {
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        let controller = AuthController::new(client, dispatch);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let credentials = LoginRequest {
                email: (*email_handle).clone(),
                password: (*password_handle).clone(),
            };
            loading_handle.set(true);
            error_handle.set(None);
            let controller = controller.clone();
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                match controller.login(&credentials).await {
                    Ok(()) => {
                        if let Some(ref nav) = navigator_handle {
                            nav.push(&MainRoute::Home);
                        }
                    }
                    Err(err) => {
                        let message = if err.is_unauthorized() {
                            "Invalid credentials".to_string()
                        } else {
                            err.to_string()
                        };
                        error_ref.set(Some(message));
                    }
                }
                loading_ref.set(false);
            });
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                email.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *loading;
    let disable_submit = (*email).is_empty() || (*password).is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{"Sign in"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            {if is_busy { "Signing in..." } else { "Sign in" }}
                        </button>
                    </div>
                    <p class="text-sm text-center mt-2">
                        {"No account yet? "}
                        <Link<MainRoute> to={MainRoute::Register} classes="link link-primary">
                            {"Register"}
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}
