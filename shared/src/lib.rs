pub mod error;
pub mod models;
pub mod validation;
pub mod user_info;
pub mod gateway;
pub mod session;
pub mod tally_chart;
pub mod topics;
pub mod history;

pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
pub use validation::*;
pub use user_info::*;
pub use gateway::{GatewayCall, GatewayError, MemoryGateway, ProposalGateway};
pub use history::{CommittedVote, VoteHistory};
pub use session::{CommitTicket, LoadTicket, SessionError, SessionPhase, VoteController, VoteSession};

#[cfg(test)]
mod tests;
