use std::collections::HashMap;
use yew::prelude::*;
use yew_router::prelude::*;
use shared::{tally_chart::label, Proposal, ProposalId};
use crate::{Route, gateway::fetch_json, styles::*, vote_log::VoteLogContext};

/// Votes cast in this browser session next to the proposals still open.
#[function_component]
pub fn Dashboard() -> Html {
    let votes = use_context::<VoteLogContext>();
    let proposals = use_state(|| None::<Result<Vec<Proposal>, String>>);

    use_effect_with_deps({
        let proposals = proposals.clone();
        move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                proposals.set(Some(fetch_json::<Vec<Proposal>>("/proposals", None).await));
            });
            || ()
        }
    }, ());

    let Some(votes) = votes else {
        return html! {};
    };
    let history = &votes.0;
    let titles: HashMap<&ProposalId, &str> = match &*proposals {
        Some(Ok(proposals)) => proposals.iter().map(|p| (&p.id, p.title.as_str())).collect(),
        _ => HashMap::new(),
    };

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Min side"}</h1>

            <div class={SPACE_Y_LG}>
                <div class={combine_classes(PANEL, FLEX_BETWEEN)}>
                    <span class="text-slate-200">{format!("Brukt: {}", history.spent())}</span>
                    <span class="text-indigo-300 font-semibold">
                        {format!("Gjenstående stemmepoeng: {}", history.remaining())}
                    </span>
                </div>

                <div class={PANEL}>
                    <h2 class={HEADING_SM}>{"Dine stemmer"}</h2>
                    if history.is_empty() {
                        <p class={TEXT_MUTED}>{"Du har ikke stemt ennå."}</p>
                    }
                    {history.votes().map(|vote| {
                        let title = titles.get(&vote.proposal_id).copied().unwrap_or(vote.proposal_id.as_str());
                        html! {
                            <div class={combine_classes(FLEX_BETWEEN, "py-2 border-b border-slate-700")}>
                                <Link<Route> to={Route::Vote { id: vote.proposal_id.to_string() }}
                                    classes="text-slate-200 hover:text-indigo-400 break-words">
                                    {title.to_string()}
                                </Link<Route>>
                                <span class={TEXT_MUTED}>{format!("{} · {} poeng", label(vote.option), vote.amount)}</span>
                            </div>
                        }
                    }).collect::<Html>()}
                </div>

                <div class={PANEL}>
                    <h2 class={HEADING_SM}>{"Aktive forslag"}</h2>
                    {match &*proposals {
                        None => html! { <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Laster..."}</div> },
                        Some(Err(error)) => html! { <div class={alert_style("error")}>{error}</div> },
                        Some(Ok(proposals)) => proposals.iter().filter(|p| p.is_open()).map(|proposal| html! {
                            <div class={combine_classes(FLEX_BETWEEN, "py-2 border-b border-slate-700")}
                                key={proposal.id.to_string()}>
                                <Link<Route> to={Route::Vote { id: proposal.id.to_string() }}
                                    classes="text-slate-200 hover:text-indigo-400 break-words">
                                    {&proposal.title}
                                </Link<Route>>
                                <span class={TEXT_MUTED}>{format!("Dine poeng: {}", history.spent_on(&proposal.id))}</span>
                            </div>
                        }).collect::<Html>(),
                    }}
                </div>
            </div>
        </div>
    }
}
