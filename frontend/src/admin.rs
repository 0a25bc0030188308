use yew::prelude::*;
use web_sys::HtmlInputElement;
use shared::topics::category_label;
use shared::{validate_proposal_request, CreateProposalRequest, Proposal, Suggestion, MAX_CATEGORY_LENGTH};
use crate::{gateway::{fetch_json, post_empty, post_json}, styles::*};

pub enum Msg {
    UpdateToken(String),
    UpdateTitle(String),
    UpdateCategory(String),
    Refresh,
    ProposalsLoaded(Result<Vec<Proposal>, String>),
    SuggestionsLoaded(Result<Vec<Suggestion>, String>),
    Create,
    Created(Result<Proposal, String>),
    Close(String),
    Closed(Result<Proposal, String>),
}

/// Proposal administration. Every request carries the token typed in here.
pub struct AdminDashboard {
    token: String,
    title: String,
    category: String,
    proposals: Vec<Proposal>,
    suggestions: Vec<Suggestion>,
    error: Option<String>,
    notice: Option<String>,
}

impl AdminDashboard {
    fn token(&self) -> Option<String> {
        let token = self.token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn upsert(&mut self, proposal: Proposal) {
        match self.proposals.iter_mut().find(|p| p.id == proposal.id) {
            Some(existing) => *existing = proposal,
            None => self.proposals.insert(0, proposal),
        }
    }
}

impl Component for AdminDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            token: String::new(),
            title: String::new(),
            category: String::new(),
            proposals: Vec::new(),
            suggestions: Vec::new(),
            error: None,
            notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateToken(token) => {
                self.token = token;
                false
            }
            Msg::UpdateTitle(title) => {
                self.title = title;
                true
            }
            Msg::UpdateCategory(category) => {
                self.category = category;
                true
            }
            Msg::Refresh => {
                let token = self.token();
                ctx.link().send_future(async move {
                    Msg::ProposalsLoaded(fetch_json("/proposals", None).await)
                });
                ctx.link().send_future(async move {
                    Msg::SuggestionsLoaded(fetch_json("/suggestions", token.as_deref()).await)
                });
                false
            }
            Msg::ProposalsLoaded(Ok(proposals)) => {
                self.proposals = proposals;
                true
            }
            Msg::SuggestionsLoaded(Ok(suggestions)) => {
                self.suggestions = suggestions;
                self.error = None;
                true
            }
            Msg::ProposalsLoaded(Err(e))
            | Msg::SuggestionsLoaded(Err(e))
            | Msg::Created(Err(e))
            | Msg::Closed(Err(e)) => {
                self.notice = None;
                self.error = Some(e);
                true
            }
            Msg::Create => {
                let request = CreateProposalRequest {
                    title: self.title.trim().to_string(),
                    category: self.category.trim().to_string(),
                };
                if let Err(e) = validate_proposal_request(&request) {
                    self.error = Some(e.to_string());
                    return true;
                }
                let token = self.token();
                ctx.link().send_future(async move {
                    Msg::Created(post_json("/proposal", Some(&request), token.as_deref()).await)
                });
                false
            }
            Msg::Created(Ok(proposal)) => {
                self.title.clear();
                self.category.clear();
                self.error = None;
                self.notice = Some(format!("Opprettet «{}»", proposal.title));
                self.upsert(proposal);
                true
            }
            Msg::Close(id) => {
                let token = self.token();
                ctx.link().send_future(async move {
                    let path = format!("/proposal/{}/close", id);
                    Msg::Closed(post_empty(&path, token.as_deref()).await)
                });
                false
            }
            Msg::Closed(Ok(proposal)) => {
                self.error = None;
                self.notice = Some(format!("Avsluttet «{}»", proposal.title));
                self.upsert(proposal);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_token = ctx.link().callback(|e: InputEvent| {
            Msg::UpdateToken(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let on_title = ctx.link().callback(|e: InputEvent| {
            Msg::UpdateTitle(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        let on_category = ctx.link().callback(|e: InputEvent| {
            Msg::UpdateCategory(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        html! {
            <div class={CONTAINER}>
                <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Administrasjon"}</h1>

                if let Some(error) = &self.error {
                    <div class={alert_style("error")}>{error}</div>
                }
                if let Some(notice) = &self.notice {
                    <div class={alert_style("success")}>{notice}</div>
                }

                <div class={SPACE_Y_LG}>
                    <div class={combine_classes(PANEL, "flex gap-4 items-end")}>
                        <div class={INPUT_GROUP}>
                            <label class={TEXT_LABEL}>{"Administratornøkkel"}</label>
                            <input type="password" class={INPUT_BASE} oninput={on_token} />
                        </div>
                        <button type="button" class={button_primary(false)}
                            onclick={ctx.link().callback(|_| Msg::Refresh)}>
                            {"Hent data"}
                        </button>
                    </div>

                    <div class={PANEL}>
                        <h2 class={HEADING_SM}>{"Nytt forslag"}</h2>
                        <div class="flex gap-4">
                            <input type="text" class={INPUT_BASE} placeholder="Tittel"
                                value={self.title.clone()} oninput={on_title} />
                            <input type="text" class={combine_classes(INPUT_BASE, "max-w-xs")} placeholder="Kategori"
                                maxlength={MAX_CATEGORY_LENGTH.to_string()}
                                value={self.category.clone()} oninput={on_category} />
                            <button type="button" class={combine_classes(BUTTON_BASE, BUTTON_SUCCESS)}
                                onclick={ctx.link().callback(|_| Msg::Create)}>
                                {"Opprett"}
                            </button>
                        </div>
                    </div>

                    <div class={PANEL}>
                        <h2 class={HEADING_SM}>{"Forslag"}</h2>
                        {self.proposals.iter().map(|proposal| {
                            let id = proposal.id.to_string();
                            let close = {
                                let id = id.clone();
                                ctx.link().callback(move |_| Msg::Close(id.clone()))
                            };
                            html! {
                                <div class={combine_classes(FLEX_BETWEEN, "py-2 border-b border-slate-700")} key={id}>
                                    <span class="text-slate-200 break-words">
                                        {&proposal.title}
                                        <span class={combine_classes(TEXT_MUTED, "ml-2")}>{category_label(proposal)}</span>
                                    </span>
                                    if proposal.is_open() {
                                        <button type="button" class={combine_classes(BUTTON_BASE, BUTTON_DANGER)}
                                            onclick={close}>
                                            {"Avslutt"}
                                        </button>
                                    } else {
                                        <span class={TEXT_MUTED}>{"Avsluttet"}</span>
                                    }
                                </div>
                            }
                        }).collect::<Html>()}
                    </div>

                    <div class={PANEL}>
                        <h2 class={HEADING_SM}>{"Innsendte forslag"}</h2>
                        {self.suggestions.iter().map(|suggestion| html! {
                            <p class="text-slate-300 py-2 border-b border-slate-700 whitespace-pre-wrap" key={suggestion.id.to_string()}>
                                {&suggestion.text}
                            </p>
                        }).collect::<Html>()}
                    </div>
                </div>
            </div>
        }
    }
}
