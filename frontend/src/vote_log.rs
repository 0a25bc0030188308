use std::rc::Rc;
use yew::prelude::*;
use shared::{CommittedVote, VoteHistory};

/// App-wide log of confirmed votes, shared between the vote page and the dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoteLog(pub VoteHistory);

impl Reducible for VoteLog {
    type Action = CommittedVote;

    fn reduce(self: Rc<Self>, vote: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.0.record(vote);
        Rc::new(next)
    }
}

pub type VoteLogContext = UseReducerHandle<VoteLog>;
