use shared::models::{AuthUser, UserListQuery};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::{
    api::{ApiClient, ApiError},
    components::user_form::{UserForm, UserFormSubmit},
    models::app_state::AppState,
    session::AuthController,
};

const PAGE_SIZE: u32 = 25;

/// Which form the page is showing, if any.
#[derive(Clone, PartialEq)]
enum FormMode {
    Create,
    Edit(AuthUser),
}

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let client = use_context::<ApiClient>().expect("ApiClient context missing");
    let (_state, dispatch) = use_store::<AppState>();
    let controller = AuthController::new(client.clone(), dispatch);

    let users = use_state(Vec::<AuthUser>::new);
    let total = use_state(|| 0u64);
    let page = use_state(|| 0u32);
    let filter = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let form = use_state(|| None::<FormMode>);
    let delete_target = use_state(|| None::<AuthUser>);
    // Bumped after every mutation to refetch the listing.
    let reload = use_state(|| 0u32);

    {
        let users = users.clone();
        let total = total.clone();
        let error = error.clone();
        let client = client.clone();
        let controller = controller.clone();
        use_effect_with(
            (*page, (*filter).clone(), *reload),
            move |(page, filter, _)| {
                let query = UserListQuery {
                    page: *page,
                    size: PAGE_SIZE,
                    filter: (!filter.is_empty()).then(|| filter.clone()),
                    ..Default::default()
                };
                spawn_local(async move {
                    match client.list_users(&query).await {
                        Ok((list, count)) => {
                            users.set(list);
                            total.set(count);
                        }
                        Err(err) if err.is_unauthorized() => controller.invalidate(),
                        Err(err) => error.set(Some(err.to_string())),
                    }
                });
                || ()
            },
        );
    }

    let handle_error = {
        let error = error.clone();
        let controller = controller.clone();
        move |err: ApiError| {
            if err.is_unauthorized() {
                controller.invalidate();
            } else {
                error.set(Some(err.to_string()));
            }
        }
    };

    let on_form_submit = {
        let client = client.clone();
        let busy = busy.clone();
        let form = form.clone();
        let reload = reload.clone();
        let handle_error = handle_error.clone();
        Callback::from(move |submit: UserFormSubmit| {
            let client = client.clone();
            let busy = busy.clone();
            let form = form.clone();
            let reload = reload.clone();
            let handle_error = handle_error.clone();
            busy.set(true);
            spawn_local(async move {
                let outcome = match submit {
                    UserFormSubmit::Create(payload) => {
                        client.create_user(&payload).await.map(|_| ())
                    }
                    UserFormSubmit::Update(payload) => {
                        client.update_user(&payload).await.map(|_| ())
                    }
                };
                match outcome {
                    Ok(()) => {
                        form.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(err) => handle_error(err),
                }
                busy.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let client = client.clone();
        let delete_target = delete_target.clone();
        let reload = reload.clone();
        let handle_error = handle_error.clone();
        Callback::from(move |_| {
            let Some(user) = (*delete_target).clone() else {
                return;
            };
            let client = client.clone();
            let delete_target = delete_target.clone();
            let reload = reload.clone();
            let handle_error = handle_error.clone();
            spawn_local(async move {
                match client.delete_user(&user.id).await {
                    Ok(()) => {
                        delete_target.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(err) => {
                        delete_target.set(None);
                        handle_error(err);
                    }
                }
            });
        })
    };

    let on_filter_input = {
        let filter = filter.clone();
        let page = page.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                page.set(0);
                filter.set(input.value());
            }
        })
    };

    let page_count = (*total as u32).div_ceil(PAGE_SIZE).max(1);
    let on_prev = {
        let page = page.clone();
        Callback::from(move |_| page.set(page.saturating_sub(1)))
    };
    let on_next = {
        let page = page.clone();
        Callback::from(move |_| page.set(*page + 1))
    };

    let open_create = {
        let form = form.clone();
        Callback::from(move |_| form.set(Some(FormMode::Create)))
    };
    let close_form = {
        let form = form.clone();
        Callback::from(move |()| form.set(None))
    };
    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };
    let cancel_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |_| delete_target.set(None))
    };

    let rows = users.iter().map(|user| {
        let open_edit = {
            let form = form.clone();
            let user = user.clone();
            Callback::from(move |_| form.set(Some(FormMode::Edit(user.clone()))))
        };
        let ask_delete = {
            let delete_target = delete_target.clone();
            let user = user.clone();
            Callback::from(move |_| delete_target.set(Some(user.clone())))
        };
        html! {
            <tr>
                <td>{&user.id}</td>
                <td>{&user.name}</td>
                <td>{&user.email}</td>
                <td>
                    <span class={classes!("badge", if user.is_admin() { "badge-primary" } else { "badge-ghost" })}>
                        {user.role.to_string()}
                    </span>
                </td>
                <td>
                    { user.created_at.map(|date| date.to_html()).unwrap_or_default() }
                </td>
                <td class="flex gap-1">
                    <button class="btn btn-ghost btn-xs" onclick={open_edit}>{"Edit"}</button>
                    <button class="btn btn-ghost btn-xs text-error" onclick={ask_delete}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-2xl font-bold">{"Users"}</h2>
                    <p class="text-sm text-base-content/70">
                        { format!("{} accounts", *total) }
                    </p>
                </div>
                <button class="btn btn-primary" onclick={open_create}>{"New user"}</button>
            </div>

            if let Some(message) = &*error {
                <div class="alert alert-error">
                    <span>{message.clone()}</span>
                    <button class="btn btn-ghost btn-sm" onclick={dismiss_error}>{"Dismiss"}</button>
                </div>
            }

            <input
                class="input input-bordered w-full max-w-sm"
                type="search"
                placeholder="Filter by name or email"
                value={(*filter).clone()}
                oninput={on_filter_input}
            />

            <div class="overflow-x-auto">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>{"Id"}</th>
                            <th>{"Name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Role"}</th>
                            <th>{"Created"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for rows }
                    </tbody>
                </table>
            </div>

            <div class="join">
                <button class="join-item btn btn-sm" disabled={*page == 0} onclick={on_prev}>
                    {"«"}
                </button>
                <span class="join-item btn btn-sm btn-disabled">
                    { format!("Page {} of {page_count}", *page + 1) }
                </span>
                <button
                    class="join-item btn btn-sm"
                    disabled={*page + 1 >= page_count}
                    onclick={on_next}
                >
                    {"»"}
                </button>
            </div>

            if let Some(mode) = (*form).clone() {
                <div class="modal modal-open">
                    <div class="modal-box">
                        <h3 class="font-bold text-lg mb-2">
                            { match &mode {
                                FormMode::Create => "New user".to_string(),
                                FormMode::Edit(user) => format!("Edit {}", user.name),
                            } }
                        </h3>
                        <UserForm
                            user={match mode { FormMode::Create => None, FormMode::Edit(user) => Some(user) }}
                            busy={*busy}
                            on_submit={on_form_submit.clone()}
                            on_cancel={close_form.clone()}
                        />
                    </div>
                </div>
            }

            if let Some(target) = &*delete_target {
                <div class="modal modal-open" role="alertdialog">
                    <div class="modal-box">
                        <h3 class="font-bold text-lg">{"Delete user"}</h3>
                        <p class="py-4">
                            { format!("Delete {} ({})? This cannot be undone.", target.name, target.email) }
                        </p>
                        <div class="modal-action">
                            <button class="btn" onclick={cancel_delete}>{"Cancel"}</button>
                            <button class="btn btn-error" onclick={on_confirm_delete}>
                                {"Delete"}
                            </button>
                        </div>
                    </div>
                </div>
            }
        </div>
    }
}
