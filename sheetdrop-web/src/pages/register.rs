use shared::models::RegisterRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yew_router::prelude::Link;
use yewdux::prelude::use_store;

use crate::{api::ApiClient, models::app_state::AppState, routes::MainRoute, session::AuthController};

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let client = use_context::<ApiClient>().expect("ApiClient context missing");
    let (_state, dispatch) = use_store::<AppState>();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    let onsubmit = {
        let name_handle = name.clone();
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        let controller = AuthController::new(client, dispatch);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let details = RegisterRequest {
                name: (*name_handle).clone(),
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
                match controller.register(&details).await {
                    Ok(()) => {
                        if let Some(ref nav) = navigator_handle {
                            nav.push(&MainRoute::Home);
                        }
                    }
                    Err(err) => error_ref.set(Some(err.to_string())),
                }
                loading_ref.set(false);
            });
        })
    };

    let on_name_change = input_setter(name.clone());
    let on_email_change = input_setter(email.clone());
    let on_password_change = input_setter(password.clone());

    let is_busy = *loading;
    let disable_submit =
        (*name).is_empty() || (*email).is_empty() || (*password).is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{"Create your account"}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="name">
                            <span class="label-text">{"Name"}</span>
                        </label>
                        <input
                            id="name"
                            class="input input-bordered"
                            type="text"
                            required=true
                            value={(*name).clone()}
                            oninput={on_name_change}
                        />
                    </div>
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
                            {if is_busy { "Creating account..." } else { "Register" }}
                        </button>
                    </div>
                    <p class="text-sm text-center mt-2">
                        {"Already registered? "}
                        <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">
                            {"Sign in"}
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}

fn input_setter(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            state.set(input.value());
        }
    })
}
