use shared::models::ImportError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorTableProps {
    pub errors: Vec<ImportError>,
}

/// Per-row import errors, rendered verbatim as the backend reported them.
#[function_component(ErrorTable)]
pub fn error_table(props: &ErrorTableProps) -> Html {
    if props.errors.is_empty() {
        return html! {};
    }

    html! {
        <div class="overflow-x-auto">
            <table class="table table-sm table-zebra">
                <thead>
                    <tr>
                        <th>{"Line"}</th>
                        <th>{"Column"}</th>
                        <th>{"Error"}</th>
                        <th>{"Value"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.errors.iter().map(|error| html! {
                        <tr>
                            <td>{error.line}</td>
                            <td>{&error.column}</td>
                            <td>{&error.error}</td>
                            <td class="font-mono">{&error.value}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}
