//! DTO modules that bridge services with the JSON API.

pub mod audiences;
pub mod campaigns;
pub mod keywords;
pub mod metrics;
pub mod recommendations;
pub mod sync;
