use yew::prelude::*;
use yew_router::prelude::*;

mod admin;
mod arguments;
mod config;
mod dashboard;
mod gateway;
mod home;
mod information;
mod logging;
mod proposals;
mod styles;
mod suggestion;
mod tally_chart;
mod topics;
mod vote_log;
mod vote_page;

use crate::{
    admin::AdminDashboard,
    dashboard::Dashboard,
    home::Home,
    information::Information,
    proposals::Proposals,
    styles::{NAV_LINK, NAV_LINK_ACTIVE},
    suggestion::SuggestionForm,
    vote_log::{VoteLog, VoteLogContext},
    vote_page::VotePage,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/proposals")] Proposals,
    #[at("/vote/:id")] Vote { id: String },
    #[at("/suggestion")] Suggestion,
    #[at("/dashboard")] Dashboard,
    #[at("/information")] Information,
    #[at("/admin")] Admin,
    #[not_found]
    #[at("/404")] NotFound,
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();
    let link = |route: Route, text: &'static str| {
        let active = current_route.as_ref() == Some(&route);
        html! {
            <Link<Route> to={route} classes={classes!(NAV_LINK, active.then_some(NAV_LINK_ACTIVE))}>
                {text}
            </Link<Route>>
        }
    };

    html! {
        <nav class="bg-slate-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                {link(Route::Home, "Hjem")}
                {link(Route::Proposals, "Forslag")}
                {link(Route::Suggestion, "Nytt forslag")}
                {link(Route::Dashboard, "Min side")}
                {link(Route::Information, "Om")}
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    let votes = use_reducer(VoteLog::default);
    html! {
        <ContextProvider<VoteLogContext> context={votes}>
            <BrowserRouter>
                <div class="min-h-screen bg-slate-900">
                    <Navigation />
                    <div class="pt-16">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </BrowserRouter>
        </ContextProvider<VoteLogContext>>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Proposals => html! { <Proposals /> },
        Route::Vote { id } => html! { <VotePage {id} /> },
        Route::Suggestion => html! { <SuggestionForm /> },
        Route::Dashboard => html! { <Dashboard /> },
        Route::Information => html! { <Information /> },
        Route::Admin => html! { <AdminDashboard /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    logging::init(config::CONFIG.log_level);
    tracing::info!("Starting frontend");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests;
