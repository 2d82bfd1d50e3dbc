//! Domain aggregates exposed by the dashboard service layer.

pub mod account;
pub mod ad;
pub mod ad_group;
pub mod audience;
pub mod campaign;
pub mod keyword;
pub mod metrics;
pub mod recommendation;
pub mod types;
