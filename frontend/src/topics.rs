use yew::prelude::*;
use yew_router::prelude::*;
use shared::{topics::group_by_category, Proposal};
use crate::{Route, gateway::fetch_json, styles::*};

/// Open proposals grouped by topic category.
#[function_component]
pub fn TopicsOverview() -> Html {
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

    let body = match &*proposals {
        None => html! { <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Laster..."}</div> },
        Some(Err(error)) => html! { <div class={alert_style("error")}>{error}</div> },
        Some(Ok(proposals)) => {
            let groups = group_by_category(proposals);
            if groups.is_empty() {
                html! { <p class={TEXT_MUTED}>{"Ingen åpne forslag."}</p> }
            } else {
                groups.into_iter().map(|(category, proposals)| html! {
                    <div class="mb-4" key={category}>
                        <h3 class="text-slate-200 font-semibold border-b border-slate-700 pb-1 mb-2">{category}</h3>
                        <ul class="space-y-1">
                            {proposals.into_iter().map(|proposal| html! {
                                <li key={proposal.id.to_string()}>
                                    <Link<Route> to={Route::Vote { id: proposal.id.to_string() }}
                                        classes="text-slate-300 hover:text-indigo-400 break-words">
                                        {&proposal.title}
                                    </Link<Route>>
                                </li>
                            }).collect::<Html>()}
                        </ul>
                    </div>
                }).collect::<Html>()
            }
        }
    };

    html! {
        <div class={PANEL}>
            <h2 class={HEADING_SM}>{"Temaoversikt"}</h2>
            {body}
        </div>
    }
}
