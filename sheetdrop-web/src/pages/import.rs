use gloo_timers::callback::Timeout;
use shared::models::{DecimalSeparator, HistoryEntry, ImportResult};
use shared::validation::validate_upload;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::{
    api::ApiClient,
    components::{
        drop_zone::DropZone, error_dialog::ErrorDialog, error_table::ErrorTable,
        history_list::HistoryList, template_card::TemplateCard,
    },
    models::app_state::AppState,
    session::AuthController,
    storage,
};

/// Lifecycle of the current upload attempt. Always ends in `Success` or
/// `Error`; the submit control is disabled while `Uploading`, so only one
/// upload is ever in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadState {
    Idle,
    Uploading,
    Success,
    Error,
}

#[function_component(ImportPage)]
pub fn import_page() -> Html {
    let client = use_context::<ApiClient>().expect("ApiClient context missing");
    let (_state, dispatch) = use_store::<AppState>();

    let file = use_state(|| None::<web_sys::File>);
    let upload_state = use_state(|| UploadState::Idle);
    let progress = use_state(|| 0u8);
    let result = use_state(|| None::<ImportResult>);
    let dialog = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let history = use_state(storage::load_history);
    let search = use_state(String::new);
    let config = use_state(storage::load_config);
    let input_ref = use_node_ref();

    let reset_input = {
        let input_ref = input_ref.clone();
        move || {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
        }
    };

    // Dropped and browsed files land here alike. Validation happens before
    // anything touches the network.
    let on_file_select = {
        let file = file.clone();
        let result = result.clone();
        let upload_state = upload_state.clone();
        let dialog = dialog.clone();
        let reset_input = reset_input.clone();
        Callback::from(move |selected: web_sys::File| {
            if let Err(err) = validate_upload(&selected.type_(), selected.size() as u64) {
                dialog.set(Some(err.to_string()));
                reset_input();
                return;
            }
            result.set(None);
            upload_state.set(UploadState::Idle);
            file.set(Some(selected));
        })
    };

    let on_remove = {
        let file = file.clone();
        let result = result.clone();
        let upload_state = upload_state.clone();
        let reset_input = reset_input.clone();
        Callback::from(move |_| {
            file.set(None);
            result.set(None);
            upload_state.set(UploadState::Idle);
            reset_input();
        })
    };

    let on_upload = {
        let file_handle = file.clone();
        let upload_state = upload_state.clone();
        let progress = progress.clone();
        let result = result.clone();
        let dialog = dialog.clone();
        let notice = notice.clone();
        let history = history.clone();
        let client = client.clone();
        let controller = AuthController::new(client.clone(), dispatch);
        Callback::from(move |_| {
            let Some(selected) = (*file_handle).clone() else {
                return;
            };
            if *upload_state == UploadState::Uploading {
                return;
            }
            upload_state.set(UploadState::Uploading);
            progress.set(0);
            result.set(None);

            let name = selected.name();
            let size = selected.size() as u64;
            let on_progress = {
                let progress = progress.clone();
                Callback::from(move |percent| progress.set(percent))
            };
            let client = client.clone();
            let controller = controller.clone();
            let upload_state = upload_state.clone();
            let result = result.clone();
            let dialog = dialog.clone();
            let notice = notice.clone();
            let history = history.clone();
            spawn_local(async move {
                match client.import_spreadsheet(&selected, on_progress).await {
                    Ok(outcome) => {
                        push_history(&history, HistoryEntry::from_result(&name, size, &outcome));
                        if outcome.success {
                            let imported = outcome.imported_rows;
                            let total = outcome.total_rows;
                            notice.set(Some(format!("Imported {imported} of {total} rows")));
                            let notice_handle = notice.clone();
                            Timeout::new(4_000, move || notice_handle.set(None)).forget();
                        }
                        result.set(Some(outcome));
                        upload_state.set(UploadState::Success);
                    }
                    Err(err) => {
                        push_history(&history, HistoryEntry::from_failure(&name, size));
                        if err.is_unauthorized() {
                            controller.invalidate();
                        }
                        dialog.set(Some(err.to_string()));
                        upload_state.set(UploadState::Error);
                    }
                }
            });
        })
    };

    let on_dialog_close = {
        let dialog = dialog.clone();
        Callback::from(move |_| dialog.set(None))
    };

    let on_search_input = {
        let search = search.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                search.set(input.value());
            }
        })
    };

    let on_date_format_input = {
        let config = config.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*config).clone();
                next.date_format = input.value();
                storage::save_config(&next);
                config.set(next);
            }
        })
    };

    let on_separator_change = {
        let config = config.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*config).clone();
                next.decimal_separator = match select.value().as_str() {
                    "comma" => DecimalSeparator::Comma,
                    _ => DecimalSeparator::Dot,
                };
                storage::save_config(&next);
                config.set(next);
            }
        })
    };

    let is_uploading = *upload_state == UploadState::Uploading;
    let disable_upload = file.is_none() || is_uploading;

    let query = search.to_lowercase();
    let filtered_history: Vec<HistoryEntry> = history
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query))
        .cloned()
        .collect();

    html! {
        <div class="space-y-6">
            <ErrorDialog message={(*dialog).clone()} on_close={on_dialog_close} />

            <div class="mb-4">
                <h2 class="text-2xl font-bold">{"Import data"}</h2>
                <p class="text-sm text-base-content/70">
                    {"Upload an Excel workbook and track the outcome of each import."}
                </p>
            </div>

            if let Some(message) = &*notice {
                <div class="alert alert-success">
                    <span>{message.clone()}</span>
                </div>
            }

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body space-y-4">
                        <h3 class="card-title">{"Upload file"}</h3>
                        <DropZone
                            input_ref={input_ref}
                            disabled={is_uploading}
                            on_select={on_file_select}
                        />

                        if let Some(selected) = &*file {
                            <div class="flex items-center justify-between p-3 bg-base-200 rounded-lg">
                                <div class="min-w-0">
                                    <p class="font-medium truncate">{selected.name()}</p>
                                    <p class="text-xs text-base-content/70">
                                        { format!("{:.2} MB", selected.size() / 1024.0 / 1024.0) }
                                    </p>
                                </div>
                                <button
                                    class="btn btn-ghost btn-sm text-error"
                                    disabled={is_uploading}
                                    onclick={on_remove.clone()}
                                >
                                    {"Remove"}
                                </button>
                            </div>
                        }

                        if is_uploading {
                            <div>
                                <progress
                                    class="progress progress-primary w-full"
                                    value={(*progress).to_string()}
                                    max="100"
                                />
                                <p class="text-xs text-center mt-1">
                                    { format!("{}%", *progress) }
                                </p>
                            </div>
                        }

                        <button
                            class="btn btn-primary w-full"
                            disabled={disable_upload}
                            onclick={on_upload}
                        >
                            { if is_uploading { "Uploading..." } else { "Import" } }
                        </button>

                        <div class="collapse collapse-arrow bg-base-200">
                            <input type="checkbox" />
                            <div class="collapse-title text-sm font-medium">
                                {"Import settings"}
                            </div>
                            <div class="collapse-content space-y-3">
                                <div class="form-control">
                                    <label class="label" for="date-format">
                                        <span class="label-text">{"Date format"}</span>
                                    </label>
                                    <input
                                        id="date-format"
                                        class="input input-bordered input-sm"
                                        type="text"
                                        value={config.date_format.clone()}
                                        oninput={on_date_format_input}
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="decimal-separator">
                                        <span class="label-text">{"Decimal separator"}</span>
                                    </label>
                                    <select
                                        id="decimal-separator"
                                        class="select select-bordered select-sm"
                                        onchange={on_separator_change}
                                    >
                                        <option
                                            value="dot"
                                            selected={config.decimal_separator == DecimalSeparator::Dot}
                                        >{"Point (.)"}</option>
                                        <option
                                            value="comma"
                                            selected={config.decimal_separator == DecimalSeparator::Comma}
                                        >{"Comma (,)"}</option>
                                    </select>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>

                <div class="space-y-6">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body space-y-4">
                            <h3 class="card-title">{"Recent imports"}</h3>
                            <input
                                class="input input-bordered input-sm w-full"
                                type="search"
                                placeholder="Filter by file name"
                                value={(*search).clone()}
                                oninput={on_search_input}
                            />
                            <HistoryList entries={filtered_history} />
                        </div>
                    </div>
                    <TemplateCard />
                </div>
            </div>

            if let Some(outcome) = &*result {
                <div class="card bg-base-100 shadow">
                    <div class="card-body space-y-3">
                        if outcome.success {
                            <div class="alert alert-success">
                                <span>
                                    { format!("{} of {} rows imported", outcome.imported_rows, outcome.total_rows) }
                                </span>
                            </div>
                        } else {
                            <div class="alert alert-error">
                                <span>{"The backend rejected this import."}</span>
                            </div>
                        }
                        <ErrorTable errors={outcome.errors.clone()} />
                    </div>
                </div>
            }
        </div>
    }
}

/// Prepend an entry (newest first) and persist the full log.
fn push_history(history: &UseStateHandle<Vec<HistoryEntry>>, entry: HistoryEntry) {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.push(entry);
    next.extend(history.iter().cloned());
    storage::save_history(&next);
    history.set(next);
}
