use web_sys::{DragEvent, File, HtmlInputElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct DropZoneProps {
    /// Emits the picked file, whether dropped or chosen through the hidden
    /// input. Validation is the caller's job.
    pub on_select: Callback<File>,
    /// The caller keeps the ref so it can reset the input after a rejected
    /// selection.
    pub input_ref: NodeRef,
    #[prop_or_default]
    pub disabled: bool,
}

/// Drag-and-drop surface for picking a spreadsheet.
///
/// Wraps a hidden file input so clicking or pressing Enter/Space opens the
/// regular file dialog, while dragging a file onto the zone feeds the same
/// selection callback.
#[function_component(DropZone)]
pub fn drop_zone(props: &DropZoneProps) -> Html {
    let dragging = use_state(|| false);

    let on_drag_enter = {
        let dragging = dragging.clone();
        let disabled = props.disabled;
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            if !disabled {
                dragging.set(true);
            }
        })
    };

    // dragover must be cancelled too or the browser navigates to the file.
    let on_drag_over = Callback::from(|event: DragEvent| event.prevent_default());

    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(false);
        })
    };

    let on_drop = {
        let dragging = dragging.clone();
        let disabled = props.disabled;
        let on_select = props.on_select.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(false);
            if disabled {
                return;
            }
            let dropped = event
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = dropped {
                on_select.emit(file);
            }
        })
    };

    let open_picker = {
        let input_ref = props.input_ref.clone();
        let disabled = props.disabled;
        move || {
            if disabled {
                return;
            }
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        }
    };

    let on_click = {
        let open_picker = open_picker.clone();
        Callback::from(move |_: MouseEvent| open_picker())
    };

    let on_key_down = Callback::from(move |event: KeyboardEvent| {
        if opens_picker(&event.key()) {
            event.prevent_default();
            open_picker();
        }
    });

    let on_input_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |event: Event| {
            let picked = event
                .target_dyn_into::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(file) = picked {
                on_select.emit(file);
            }
        })
    };

    let zone_class = zone_classes(*dragging, props.disabled);

    html! {
        <div>
            <input
                ref={props.input_ref.clone()}
                class="hidden"
                type="file"
                accept=".xlsx,.xls"
                disabled={props.disabled}
                onchange={on_input_change}
            />
            <div
                role="button"
                tabindex={if props.disabled { "-1" } else { "0" }}
                aria-label="Upload zone. Drop a spreadsheet here or press Enter to browse"
                class={zone_class}
                ondragenter={on_drag_enter}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}
                onclick={on_click}
                onkeydown={on_key_down}
            >
                <Icon
                    icon_id={if *dragging { IconId::HeroiconsOutlineDocumentArrowUp } else { IconId::HeroiconsOutlineArrowUpTray }}
                    width="3em"
                    height="3em"
                />
                <p class="font-semibold">
                    { if *dragging { "Drop the file here" } else { "Drag your spreadsheet here" } }
                </p>
                <p class="text-sm text-base-content/70">{"or click to browse"}</p>
                <p class="text-xs text-base-content/60">{".xlsx or .xls, up to 10 MiB"}</p>
            </div>
        </div>
    }
}

/// Keys that open the file picker when the zone has focus.
fn opens_picker(key: &str) -> bool {
    key == "Enter" || key == " "
}

fn zone_classes(dragging: bool, disabled: bool) -> Classes {
    classes!(
        "flex",
        "flex-col",
        "items-center",
        "justify-center",
        "gap-2",
        "min-h-48",
        "p-6",
        "rounded-lg",
        "border-2",
        "cursor-pointer",
        if dragging {
            "border-solid border-primary bg-primary/10"
        } else {
            "border-dashed border-base-300 bg-base-200 hover:border-primary/50"
        },
        disabled.then_some("opacity-50 pointer-events-none"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enter_and_space_open_the_picker() {
        assert!(opens_picker("Enter"));
        assert!(opens_picker(" "));
        assert!(!opens_picker("Escape"));
        assert!(!opens_picker("a"));
        assert!(!opens_picker("Tab"));
    }

    #[test]
    fn test_drag_state_switches_the_border_treatment() {
        let idle = zone_classes(false, false).to_string();
        let dragging = zone_classes(true, false).to_string();

        assert!(idle.contains("border-dashed"));
        assert!(dragging.contains("border-solid"));
        assert!(!dragging.contains("border-dashed"));
    }

    #[test]
    fn test_disabled_zone_ignores_pointer_events() {
        let disabled = zone_classes(false, true).to_string();
        assert!(disabled.contains("pointer-events-none"));
        assert!(!zone_classes(false, false).to_string().contains("pointer-events-none"));
    }
}
