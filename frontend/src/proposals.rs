use yew::prelude::*;
use yew_router::prelude::*;
use gloo_timers::callback::Interval;
use shared::Proposal;
use std::rc::Rc;
use crate::{Route, gateway::fetch_json, styles::*, config::CONFIG};

#[derive(Clone, Default)]
pub struct ProposalsState {
    proposals: Vec<Proposal>,
    error: Option<String>,
    loaded: bool,
}

pub enum Msg {
    ProposalsReceived(Vec<Proposal>),
    Error(String),
}

impl Reducible for ProposalsState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::ProposalsReceived(proposals) => {
                next.proposals = proposals;
                next.error = None;
                next.loaded = true;
            },
            Msg::Error(error) => {
                next.error = Some(error);
            },
        }
        Rc::new(next)
    }
}

fn fetch(state: UseReducerHandle<ProposalsState>) {
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_json::<Vec<Proposal>>("/proposals", None).await {
            Ok(proposals) => state.dispatch(Msg::ProposalsReceived(proposals)),
            Err(e) => state.dispatch(Msg::Error(e)),
        }
    });
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        format!("{}...", text.chars().take(limit).collect::<String>())
    } else {
        text.to_string()
    }
}

#[function_component]
pub fn Proposals() -> Html {
    let state = use_reducer(ProposalsState::default);

    use_effect_with_deps({
        let state = state.clone();
        move |_| {
            fetch(state.clone());
            let interval = Interval::new(CONFIG.refresh_interval_ms, move || fetch(state.clone()));
            move || drop(interval)
        }
    }, ());

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Forslag"}</h1>

            if let Some(error) = &state.error {
                <div class={alert_style("error")}>{error}</div>
            }

            <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                {state.proposals.iter().map(|proposal| html! {
                    <Link<Route> to={Route::Vote { id: proposal.id.to_string() }}
                        classes={classes!(CARD_HOVER_SCALE, "hover:shadow-lg", "transition-shadow")}>
                        <div class="h-full flex flex-col">
                            <h2 class={HEADING_SM} title={proposal.title.clone()}>
                                {truncate(&proposal.title, 40)}
                            </h2>
                            <div class={combine_classes(FLEX_BETWEEN, "mt-auto")}>
                                <p class={TEXT_MUTED}>{format!("Stemmer: {}", proposal.total_votes())}</p>
                                <span class={if proposal.is_open() { "text-green-300" } else { "text-orange-400" }}>
                                    {if proposal.is_open() { "Åpen" } else { "Avsluttet" }}
                                </span>
                            </div>
                        </div>
                    </Link<Route>>
                }).collect::<Html>()}
            </div>

            if !state.loaded && state.error.is_none() {
                <div class="flex justify-center p-8">
                    <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Laster forslag..."}</div>
                </div>
            } else if state.loaded && state.proposals.is_empty() {
                <p class={combine_classes(TEXT_MUTED, "text-center")}>{"Ingen forslag ennå."}</p>
            }
        </div>
    }
}
