//! Database models shared across the dashboard repository.

pub mod account;
pub mod ad;
pub mod ad_group;
pub mod audience;
pub mod campaign;
pub mod config;
pub mod keyword;
pub mod metrics;
pub mod recommendation;
