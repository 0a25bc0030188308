use yew::prelude::*;
use yew_router::prelude::*;
use shared::Proposal;
use crate::{Route, gateway::fetch_json, styles::*, tally_chart::TallyChart, topics::TopicsOverview, config::CONFIG};

#[function_component]
pub fn Home() -> Html {
    let trending = use_state(|| None::<Result<Vec<Proposal>, String>>);

    use_effect_with_deps({
        let trending = trending.clone();
        move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let path = format!("/proposals/trending?limit={}", CONFIG.trending_limit);
                trending.set(Some(fetch_json::<Vec<Proposal>>(&path, None).await));
            });
            || ()
        }
    }, ());

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Direktedemokrati"}</h1>

            <div class="space-y-8 max-w-3xl mx-auto">
                <div class={PANEL}>
                    <p class="text-slate-300 mb-4">
                        {"Hver bruker har en pott med stemmepoeng. Velg et forslag, bestem hvor mange
                        poeng du vil bruke, og stem Ja, Nei eller Blank. Poengene trekkes fra potten
                        først når stemmen er registrert."}
                    </p>
                    <div class="flex flex-col sm:flex-row gap-4 justify-center">
                        <Link<Route> to={Route::Proposals}
                            classes="bg-indigo-600 hover:bg-indigo-700 text-white px-8 py-3 rounded-lg text-lg font-semibold text-center transition-colors">
                            {"Se forslag"}
                        </Link<Route>>
                        <Link<Route> to={Route::Suggestion}
                            classes="bg-green-600 hover:bg-green-700 text-white px-8 py-3 rounded-lg text-lg font-semibold text-center transition-colors">
                            {"Send inn et forslag"}
                        </Link<Route>>
                    </div>
                </div>

                <div class={PANEL}>
                    <h2 class={HEADING_SM}>{"Populære forslag"}</h2>
                    {match &*trending {
                        None => html! {
                            <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Laster..."}</div>
                        },
                        Some(Err(error)) => html! { <div class={alert_style("error")}>{error}</div> },
                        Some(Ok(proposals)) if proposals.is_empty() => html! {
                            <p class={TEXT_MUTED}>{"Ingen åpne forslag."}</p>
                        },
                        Some(Ok(proposals)) => proposals.iter().map(|proposal| html! {
                            <Link<Route> to={Route::Vote { id: proposal.id.to_string() }}
                                classes="block mb-4 hover:opacity-90">
                                <p class="text-slate-100 font-medium mb-2 break-words">{&proposal.title}</p>
                                <TallyChart tally={proposal.tally} show_legend={false} />
                            </Link<Route>>
                        }).collect::<Html>(),
                    }}
                </div>

                <TopicsOverview />
            </div>
        </div>
    }
}
