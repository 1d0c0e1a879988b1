use shared::models::{HistoryEntry, ImportStatus};
use yew::prelude::*;

/// How many entries the list shows; storage keeps the full log.
const DEFAULT_DISPLAY_LIMIT: usize = 20;

#[derive(Properties, PartialEq)]
pub struct HistoryListProps {
    /// Entries, newest first; the caller has already applied any search
    /// filter.
    pub entries: Vec<HistoryEntry>,
    #[prop_or(DEFAULT_DISPLAY_LIMIT)]
    pub limit: usize,
}

#[function_component(HistoryList)]
pub fn history_list(props: &HistoryListProps) -> Html {
    let show_all = use_state(|| false);

    if props.entries.is_empty() {
        return html! {
            <p class="text-sm text-base-content/60 py-4">{"No uploads yet."}</p>
        };
    }

    let visible = visible_count(props.entries.len(), props.limit, *show_all);
    let toggle = {
        let show_all = show_all.clone();
        Callback::from(move |_| show_all.set(!*show_all))
    };

    html! {
        <>
            <ul class="space-y-2">
                { for props.entries.iter().take(visible).map(render_entry) }
            </ul>
            if props.entries.len() > props.limit {
                <button class="btn btn-ghost btn-sm w-full" onclick={toggle}>
                    { if *show_all {
                        "Show fewer".to_string()
                    } else {
                        format!("Show all ({})", props.entries.len())
                    } }
                </button>
            }
        </>
    }
}

/// How many entries to render given the display cap and the toggle state.
fn visible_count(total: usize, limit: usize, show_all: bool) -> usize {
    if show_all { total } else { limit.min(total) }
}

fn render_entry(entry: &HistoryEntry) -> Html {
    let (badge_class, badge_label) = match entry.status {
        ImportStatus::Success => ("badge-success", "success"),
        ImportStatus::Error => ("badge-error", "error"),
        ImportStatus::Processing => ("badge-warning", "processing"),
    };

    let stats = match (entry.imported_rows, entry.total_rows) {
        (Some(imported), Some(total)) => {
            let errors = entry.error_count.unwrap_or(0);
            html! {
                <span class="text-xs text-base-content/70">
                    { format!("{imported}/{total} rows imported, {errors} errors") }
                </span>
            }
        }
        _ => html! {},
    };

    html! {
        <li class="card card-compact bg-base-200">
            <div class="card-body flex-row items-center justify-between gap-3">
                <div class="min-w-0">
                    <p class="font-medium truncate">{&entry.name}</p>
                    <p class="text-xs text-base-content/70">
                        { format!("{} · ", format_size(entry.size)) }{entry.date.to_html()}
                    </p>
                    {stats}
                </div>
                <span class={classes!("badge", badge_class)}>{badge_label}</span>
            </div>
        </li>
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2_048), "2.0 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.00 MB");
    }

    #[test]
    fn test_visible_count_respects_the_cap_until_expanded() {
        assert_eq!(visible_count(50, 20, false), 20);
        assert_eq!(visible_count(50, 20, true), 50);
        // Fewer entries than the cap: the toggle changes nothing.
        assert_eq!(visible_count(3, 20, false), 3);
        assert_eq!(visible_count(3, 20, true), 3);
    }
}
