use yew::prelude::*;
use yew_router::prelude::*;
use web_sys::HtmlInputElement;
use shared::{
    tally_chart::label, CommitTicket, CommittedVote, GatewayError, LoadTicket, Proposal, ProposalGateway, ProposalId,
    SessionPhase, VoteOption, VoteSession,
};
use crate::{
    Route, arguments::ProposalArguments, gateway::HttpGateway, styles::*, tally_chart::TallyChart,
    vote_log::VoteLogContext,
};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: String,
}

pub enum Msg {
    Loaded(LoadTicket, Result<Proposal, GatewayError>),
    SetAmount(i64),
    Submit(VoteOption),
    Committed(CommitTicket, Result<(), GatewayError>),
    Retry,
}

/// Drives a [`VoteSession`] from component callbacks. Each network response
/// carries the ticket it was issued for, so replies to an earlier id or an
/// unmounted page are dropped by the session. Confirmed votes go to the
/// app-wide [`VoteLogContext`], which also seeds the starting budget.
pub struct VotePage {
    session: VoteSession,
    gateway: HttpGateway,
    votes: Option<VoteLogContext>,
}

impl VotePage {
    fn start_load(&mut self, ctx: &Context<Self>, id: &str) {
        let Ok(ticket) = self.session.begin_load(ProposalId::from(id)) else {
            return;
        };
        let gateway = self.gateway;
        ctx.link().send_future(async move {
            let result = gateway.get(&ticket.proposal_id).await;
            Msg::Loaded(ticket, result)
        });
    }
}

impl Component for VotePage {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let votes = ctx.link().context::<VoteLogContext>(Callback::noop()).map(|(votes, _)| votes);
        let session = match &votes {
            Some(votes) => VoteSession::with_budget(votes.0.remaining()),
            None => VoteSession::new(),
        };
        let mut page = Self { session, gateway: HttpGateway::default(), votes };
        page.start_load(ctx, &ctx.props().id);
        page
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().id != old_props.id {
            self.start_load(ctx, &ctx.props().id);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(ticket, result) => {
                // Stale replies are discarded inside the session; errors are kept in last_error.
                let _ = self.session.apply_loaded(ticket, result);
                true
            }
            Msg::SetAmount(amount) => {
                self.session.set_pending_amount(amount);
                true
            }
            Msg::Submit(option) => {
                let Ok(ticket) = self.session.prepare_submit(option) else {
                    return true;
                };
                let gateway = self.gateway;
                ctx.link().send_future(async move {
                    let result = gateway
                        .increment_tally(&ticket.proposal_id, ticket.option, ticket.amount)
                        .await;
                    Msg::Committed(ticket, result)
                });
                true
            }
            Msg::Committed(ticket, result) => {
                let vote = CommittedVote::from(&ticket);
                if self.session.apply_commit(ticket, result).is_ok() {
                    if let Some(votes) = &self.votes {
                        votes.dispatch(vote);
                    }
                }
                true
            }
            Msg::Retry => {
                let id = ctx.props().id.clone();
                self.start_load(ctx, &id);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.session.phase() {
            SessionPhase::Idle | SessionPhase::Loading => html! {
                <div class="flex justify-center p-8">
                    <div class="animate-pulse text-lg text-slate-400">{"Laster forslag..."}</div>
                </div>
            },
            SessionPhase::NotFound => html! {
                <div class={CONTAINER_SM}>
                    <div class={alert_style("error")}>{"Forslaget finnes ikke"}</div>
                    <Link<Route> to={Route::Proposals} classes={classes!(button_primary(false))}>
                        {"Tilbake til forslag"}
                    </Link<Route>>
                </div>
            },
            SessionPhase::FetchFailed => html! {
                <div class={CONTAINER_SM}>
                    <div class={alert_style("error")}>
                        {self.session.last_error().map(|e| e.to_string()).unwrap_or_default()}
                    </div>
                    <button type="button" class={button_primary(false)}
                        onclick={ctx.link().callback(|_| Msg::Retry)}>
                        {"Prøv igjen"}
                    </button>
                </div>
            },
            SessionPhase::Ready => self.render_ready(ctx),
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.session.close();
    }
}

impl VotePage {
    fn render_ready(&self, ctx: &Context<Self>) -> Html {
        let submitting = self.session.is_submitting();
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetAmount(input.value().trim().parse::<i64>().unwrap_or(0))
        });

        html! {
            <div class={CONTAINER}>
                <h1 class={combine_classes(HEADING_MD, "break-words")}>
                    {self.session.title().unwrap_or_default()}
                </h1>

                if let Some(tally) = self.session.tally() {
                    <TallyChart tally={*tally} />
                }

                <div class={combine_classes(SPACE_Y_LG, "mt-6")}>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="vote-amount">{"Antall stemmepoeng"}</label>
                        <input id="vote-amount" type="number" min="1" class={INPUT_BASE}
                            disabled={submitting}
                            value={self.session.pending_amount().to_string()}
                            {oninput} />
                    </div>

                    <p class={TEXT_MUTED}>
                        {format!("Gjenstående stemmepoeng: {}", self.session.remaining_budget())}
                    </p>

                    <div class={GRID_COLS_3}>
                        {VoteOption::ALL.iter().map(|&option| {
                            let style = match option {
                                VoteOption::Yes => BUTTON_SUCCESS,
                                VoteOption::No => BUTTON_DANGER,
                                VoteOption::Blank => BUTTON_NEUTRAL,
                            };
                            html! {
                                <button type="button" disabled={submitting}
                                    class={combine_classes(BUTTON_BASE, style)}
                                    onclick={ctx.link().callback(move |_| Msg::Submit(option))}>
                                    {format!("Stem {}", label(option))}
                                </button>
                            }
                        }).collect::<Html>()}
                    </div>

                    if submitting {
                        <div class="animate-pulse text-indigo-400 text-center">{"Sender stemme..."}</div>
                    }
                    if let Some(error) = self.session.last_error() {
                        <p class={TEXT_ERROR}>{error.to_string()}</p>
                    }
                </div>

                <ProposalArguments proposal_id={ctx.props().id.clone()} />
            </div>
        }
    }
}
