use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// Points every vote session starts with.
pub const STARTING_BUDGET: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProposalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProposalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOption {
    Yes,
    No,
    Blank,
}

impl VoteOption {
    pub const ALL: [VoteOption; 3] = [VoteOption::Yes, VoteOption::No, VoteOption::Blank];

    pub const fn as_str(self) -> &'static str {
        match self {
            VoteOption::Yes => "yes",
            VoteOption::No => "no",
            VoteOption::Blank => "blank",
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(VoteOption::Yes),
            "no" => Ok(VoteOption::No),
            "blank" => Ok(VoteOption::Blank),
            other => Err(format!("Unknown vote option: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: u64,
    pub no: u64,
    pub blank: u64,
}

impl Tally {
    pub fn get(&self, option: VoteOption) -> u64 {
        match option {
            VoteOption::Yes => self.yes,
            VoteOption::No => self.no,
            VoteOption::Blank => self.blank,
        }
    }

    /// Adds `amount` to one option. Saturates instead of wrapping.
    pub fn add(&mut self, option: VoteOption, amount: u64) {
        let slot = match option {
            VoteOption::Yes => &mut self.yes,
            VoteOption::No => &mut self.no,
            VoteOption::Blank => &mut self.blank,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u64 {
        self.yes.saturating_add(self.no).saturating_add(self.blank)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "backend", derive(sqlx::Type))]
#[cfg_attr(feature = "backend", sqlx(type_name = "proposal_status", rename_all = "lowercase"))]
pub enum ProposalStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub tally: Tally,
    #[serde(default)]
    pub status: ProposalStatus,
}

impl Proposal {
    pub fn new(id: impl Into<ProposalId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            tally: Tally::default(),
            status: ProposalStatus::Open,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == ProposalStatus::Open
    }

    pub fn total_votes(&self) -> u64 {
        self.tally.total()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementRequest {
    pub option: VoteOption,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    pub title: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Uuid,
    pub text: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    pub id: Uuid,
    pub proposal_id: ProposalId,
    pub text: String,
    pub up: u64,
    pub down: u64,
    pub created_at: OffsetDateTime,
}

impl Argument {
    pub fn net(&self) -> i64 {
        let up = i64::try_from(self.up).unwrap_or(i64::MAX);
        let down = i64::try_from(self.down).unwrap_or(i64::MAX);
        up.saturating_sub(down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentReaction {
    Up,
    Down,
}

impl ArgumentReaction {
    pub const fn as_str(self) -> &'static str {
        match self {
            ArgumentReaction::Up => "up",
            ArgumentReaction::Down => "down",
        }
    }

    /// API path reacting to the argument with this id.
    pub fn path(self, argument_id: Uuid) -> String {
        format!("/argument/{}/{}", argument_id, self.as_str())
    }
}

impl FromStr for ArgumentReaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(ArgumentReaction::Up),
            "down" => Ok(ArgumentReaction::Down),
            other => Err(format!("Unknown reaction: {}", other)),
        }
    }
}
