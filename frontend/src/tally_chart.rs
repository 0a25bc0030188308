use yew::prelude::*;
use shared::{tally_chart::{bar_height, chart_bars, scale_max, DATASET_LABEL}, Tally};
use crate::styles::*;

const BAR_AREA_PX: u64 = 160;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub tally: Tally,
    #[prop_or(true)]
    pub show_legend: bool,
}

#[function_component]
pub fn TallyChart(props: &Props) -> Html {
    let bars = chart_bars(&props.tally);
    let max = scale_max(&bars);

    html! {
        <div class={CARD_SECTION}>
            if props.show_legend {
                <p class={TEXT_LABEL_SM}>{DATASET_LABEL}</p>
            }
            <div class="flex items-end justify-around gap-4" style={format!("height: {}px", BAR_AREA_PX + 40)}>
                {bars.iter().map(|bar| {
                    let height = bar_height(bar.value, max, BAR_AREA_PX);
                    html! {
                        <div class="flex flex-col items-center w-16" key={bar.label}>
                            <span class="text-sm text-slate-200 mb-1">{bar.value}</span>
                            <div class="w-full rounded-t-md transition-all duration-300"
                                style={format!("height: {}px; background-color: {}", height, bar.color)}
                                title={format!("{:.1}%", bar.share)} />
                            <span class={combine_classes(TEXT_MUTED, "mt-2")}>{bar.label}</span>
                        </div>
                    }
                }).collect::<Html>()}
            </div>
        </div>
    }
}
