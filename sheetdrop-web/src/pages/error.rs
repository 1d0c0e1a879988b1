use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::MainRoute;

#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="p-4 flex flex-col items-center gap-4">
            <h1 class="text-3xl font-bold">{"Page not found"}</h1>
            <p class="text-base-content/70">{"The page you were looking for does not exist."}</p>
            <Link<MainRoute> to={MainRoute::Home} classes="btn btn-primary">
                {"Back to imports"}
            </Link<MainRoute>>
        </div>
    }
}
