use yew::prelude::*;
use shared::STARTING_BUDGET;
use crate::styles::*;

#[function_component]
pub fn Information() -> Html {
    html! {
        <div class={CONTAINER_SM}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Om direktedemokrati"}</h1>
            <div class={combine_classes(PANEL, SPACE_Y_LG)}>
                <p class="text-slate-300">
                    {"Direkte demokrati handler om at borgerne skal ha reell innflytelse på politiske
                    beslutninger. Her kan du stemme på aktuelle forslag, se resultatene oppdatert
                    fortløpende og delta i diskusjonen med argumenter for og mot."}
                </p>
                <p class="text-slate-300">
                    {format!("Hver økt starter med {} stemmepoeng. Du velger selv hvor mange poeng du vil \
                        bruke på hvert forslag, og poengene trekkes først når stemmen er registrert.", STARTING_BUDGET)}
                </p>
                <p class={TEXT_MUTED}>
                    {"Har du en sak som burde vært til avstemning? Send den inn som et forslag."}
                </p>
            </div>
        </div>
    }
}
