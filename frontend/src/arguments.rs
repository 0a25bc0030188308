use yew::prelude::*;
use web_sys::HtmlTextAreaElement;
use shared::{
    validate_argument, word_count, Argument, ArgumentReaction, ArgumentRequest, MAX_ARGUMENTS_PER_PROPOSAL,
    MAX_ARGUMENT_WORDS,
};
use uuid::Uuid;
use crate::{gateway::{fetch_json, post_empty, post_json}, styles::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub proposal_id: String,
}

pub enum Msg {
    Loaded(Result<Vec<Argument>, String>),
    UpdateText(String),
    Submit,
    Added(Result<Argument, String>),
    React(Uuid, ArgumentReaction),
    Reacted(Result<Argument, String>),
}

pub struct ProposalArguments {
    arguments: Vec<Argument>,
    text: String,
    submitting: bool,
    error: Option<String>,
}

impl ProposalArguments {
    fn load(ctx: &Context<Self>) {
        let path = format!("/proposal/{}/arguments", ctx.props().proposal_id);
        ctx.link().send_future(async move { Msg::Loaded(fetch_json(&path, None).await) });
    }

    fn replace(&mut self, updated: Argument) {
        if let Some(existing) = self.arguments.iter_mut().find(|a| a.id == updated.id) {
            *existing = updated;
        }
    }
}

impl Component for ProposalArguments {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        Self { arguments: Vec::new(), text: String::new(), submitting: false, error: None }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().proposal_id != old_props.proposal_id {
            self.arguments.clear();
            Self::load(ctx);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(arguments)) => {
                self.arguments = arguments;
                true
            }
            Msg::Loaded(Err(e)) | Msg::Added(Err(e)) | Msg::Reacted(Err(e)) => {
                self.submitting = false;
                self.error = Some(e);
                true
            }
            Msg::UpdateText(text) => {
                self.text = text;
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if let Err(e) = validate_argument(&self.text, self.arguments.len()) {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.submitting = true;
                self.error = None;
                let path = format!("/proposal/{}/arguments", ctx.props().proposal_id);
                let request = ArgumentRequest { text: self.text.trim().to_string() };
                ctx.link().send_future(async move {
                    Msg::Added(post_json(&path, Some(&request), None).await)
                });
                true
            }
            Msg::Added(Ok(argument)) => {
                self.submitting = false;
                self.text.clear();
                self.arguments.push(argument);
                true
            }
            Msg::React(id, reaction) => {
                let path = reaction.path(id);
                ctx.link().send_future(async move { Msg::Reacted(post_empty(&path, None).await) });
                false
            }
            Msg::Reacted(Ok(argument)) => {
                self.replace(argument);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let full = self.arguments.len() >= MAX_ARGUMENTS_PER_PROPOSAL;
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::UpdateText(input.value())
        });

        html! {
            <div class={combine_classes(PANEL, "mt-8")}>
                <h2 class={HEADING_SM}>{"Argumenter"}</h2>

                <ul class="space-y-3 mb-6">
                    {self.arguments.iter().map(|argument| {
                        let id = argument.id;
                        html! {
                            <li class={combine_classes(CARD_SECTION, FLEX_BETWEEN)} key={argument.id.to_string()}>
                                <p class="text-slate-200 break-words pr-4">{&argument.text}</p>
                                <div class="flex items-center gap-2 shrink-0">
                                    <button type="button" class="text-green-400 hover:text-green-300"
                                        onclick={ctx.link().callback(move |_| Msg::React(id, ArgumentReaction::Up))}>
                                        {format!("👍 {}", argument.up)}
                                    </button>
                                    <button type="button" class="text-red-400 hover:text-red-300"
                                        onclick={ctx.link().callback(move |_| Msg::React(id, ArgumentReaction::Down))}>
                                        {format!("👎 {}", argument.down)}
                                    </button>
                                    <span class={TEXT_MUTED}>{argument.net()}</span>
                                </div>
                            </li>
                        }
                    }).collect::<Html>()}
                </ul>

                if full {
                    <p class={TEXT_MUTED}>{"Maks antall argumenter er nådd."}</p>
                } else {
                    <div class={INPUT_GROUP}>
                        <textarea rows="3" class={INPUT_BASE} disabled={self.submitting}
                            value={self.text.clone()} {oninput} />
                        <p class={TEXT_MUTED}>
                            {format!("{}/{} ord", word_count(&self.text), MAX_ARGUMENT_WORDS)}
                        </p>
                        <button type="button" class={button_primary(false)} disabled={self.submitting}
                            onclick={ctx.link().callback(|_| Msg::Submit)}>
                            {"Legg til argument"}
                        </button>
                    </div>
                }

                if let Some(error) = &self.error {
                    <p class={combine_classes(TEXT_ERROR, "mt-3")}>{error}</p>
                }
            </div>
        }
    }
}
