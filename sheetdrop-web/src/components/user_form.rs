use shared::models::{AuthUser, CreateUserRequest, UpdateUserRequest, UserRole};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// What the form produces: a creation payload, or a partial update keyed by
/// the edited user's id.
#[derive(Debug, Clone, PartialEq)]
pub enum UserFormSubmit {
    Create(CreateUserRequest),
    Update(UpdateUserRequest),
}

#[derive(Properties, PartialEq)]
pub struct UserFormProps {
    /// Editing this user; `None` means creating a new one.
    #[prop_or_default]
    pub user: Option<AuthUser>,
    pub busy: bool,
    pub on_submit: Callback<UserFormSubmit>,
    pub on_cancel: Callback<()>,
}

#[function_component(UserForm)]
pub fn user_form(props: &UserFormProps) -> Html {
    let editing = props.user.clone();
    let name = use_state(|| editing.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = use_state(|| editing.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let password = use_state(String::new);
    let role = use_state(|| {
        editing
            .as_ref()
            .map(|u| u.role)
            .unwrap_or(UserRole::User)
    });

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let role = role.clone();
        let editing = editing.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let submit = match &editing {
                // The create endpoint does not accept a role; new accounts
                // start as plain users.
                None => UserFormSubmit::Create(CreateUserRequest {
                    name: (*name).clone(),
                    email: (*email).clone(),
                    password: (*password).clone(),
                }),
                Some(user) => UserFormSubmit::Update(UpdateUserRequest {
                    id: user.id.clone(),
                    name: Some((*name).clone()),
                    email: Some((*email).clone()),
                    password: (!password.is_empty()).then(|| (*password).clone()),
                    role: Some(*role),
                }),
            };
            on_submit.emit(submit);
        })
    };

    let on_name_input = input_setter(name.clone());
    let on_email_input = input_setter(email.clone());
    let on_password_input = input_setter(password.clone());

    let on_role_change = {
        let role = role.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(parsed) = select.value().parse() {
                    role.set(parsed);
                }
            }
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    let is_edit = editing.is_some();
    let disable_submit = props.busy
        || (*name).is_empty()
        || (*email).is_empty()
        || (!is_edit && (*password).is_empty());

    html! {
        <form class="space-y-3" onsubmit={onsubmit}>
            <div class="form-control">
                <label class="label" for="user-name">
                    <span class="label-text">{"Name"}</span>
                </label>
                <input
                    id="user-name"
                    class="input input-bordered"
                    type="text"
                    required=true
                    value={(*name).clone()}
                    oninput={on_name_input}
                />
            </div>
            <div class="form-control">
                <label class="label" for="user-email">
                    <span class="label-text">{"Email"}</span>
                </label>
                <input
                    id="user-email"
                    class="input input-bordered"
                    type="email"
                    required=true
                    value={(*email).clone()}
                    oninput={on_email_input}
                />
            </div>
            <div class="form-control">
                <label class="label" for="user-password">
                    <span class="label-text">
                        { if is_edit { "New password (leave empty to keep)" } else { "Password" } }
                    </span>
                </label>
                <input
                    id="user-password"
                    class="input input-bordered"
                    type="password"
                    required={!is_edit}
                    value={(*password).clone()}
                    oninput={on_password_input}
                />
            </div>
            if is_edit {
                <div class="form-control">
                    <label class="label" for="user-role">
                        <span class="label-text">{"Role"}</span>
                    </label>
                    <select
                        id="user-role"
                        class="select select-bordered"
                        onchange={on_role_change}
                    >
                        <option value="user" selected={*role == UserRole::User}>{"user"}</option>
                        <option value="admin" selected={*role == UserRole::Admin}>{"admin"}</option>
                    </select>
                </div>
            }
            <div class="flex justify-end gap-2 mt-4">
                <button class="btn btn-ghost" type="button" onclick={on_cancel}>
                    {"Cancel"}
                </button>
                <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                    { if is_edit { "Save" } else { "Create" } }
                </button>
            </div>
        </form>
    }
}

fn input_setter(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            state.set(input.value());
        }
    })
}
