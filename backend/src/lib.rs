pub mod admin;
pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod processor;
pub mod rate_limiter;
pub mod routes;
pub mod store;
pub mod utils;
pub use shared::{models::*, error::*, user_info::*};

#[cfg(test)]
mod tests;
