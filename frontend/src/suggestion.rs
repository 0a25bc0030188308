use yew::prelude::*;
use web_sys::HtmlTextAreaElement;
use shared::{validate_suggestion, MAX_SUGGESTION_LENGTH};
use crate::{gateway::submit_suggestion, styles::*};

#[derive(PartialEq)]
enum SubmissionState {
    Ready,
    Submitting,
    Success,
    Error(String),
}

pub enum Msg {
    UpdateText(String),
    Submit,
    Submitted(Result<(), String>),
}

pub struct SuggestionForm {
    text: String,
    state: SubmissionState,
}

impl Component for SuggestionForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self { text: String::new(), state: SubmissionState::Ready }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateText(text) => {
                self.text = text;
                if self.state != SubmissionState::Submitting {
                    self.state = SubmissionState::Ready;
                }
                true
            }
            Msg::Submit => {
                if self.state == SubmissionState::Submitting {
                    return false;
                }
                if let Err(e) = validate_suggestion(&self.text) {
                    self.state = SubmissionState::Error(e.to_string());
                    return true;
                }

                self.state = SubmissionState::Submitting;
                let text = self.text.trim().to_string();
                ctx.link().send_future(async move {
                    Msg::Submitted(submit_suggestion(text).await.map(|_| ()))
                });
                true
            }
            Msg::Submitted(result) => {
                self.state = match result {
                    Ok(()) => {
                        self.text.clear();
                        SubmissionState::Success
                    }
                    Err(e) => SubmissionState::Error(e),
                };
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let submitting = self.state == SubmissionState::Submitting;
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::UpdateText(input.value())
        });
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class={CONTAINER_SM}>
                <h1 class={HEADING_MD}>{"Send inn et forslag"}</h1>
                <form {onsubmit} class={SPACE_Y_LG}>
                    <div class={INPUT_GROUP}>
                        <label class={TEXT_LABEL} for="suggestion-text">{"Forslag"}</label>
                        <textarea id="suggestion-text" rows="6" class={INPUT_BASE}
                            maxlength={MAX_SUGGESTION_LENGTH.to_string()}
                            disabled={submitting}
                            value={self.text.clone()}
                            {oninput} />
                        <p class={TEXT_MUTED}>
                            {format!("{}/{}", self.text.chars().count(), MAX_SUGGESTION_LENGTH)}
                        </p>
                    </div>

                    {match &self.state {
                        SubmissionState::Success => html! {
                            <div class={alert_style("success")}>{"Forslaget er sendt inn!"}</div>
                        },
                        SubmissionState::Error(error) => html! {
                            <div class={alert_style("error")}>{error}</div>
                        },
                        _ => html! {},
                    }}

                    <button type="submit" class={button_primary(true)} disabled={submitting}>
                        {if submitting { "Sender..." } else { "Send inn" }}
                    </button>
                </form>
            </div>
        }
    }
}
