//! HTTP adapter for practice statistics endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{RecordPracticeRequest, StatsResponse};
pub use handlers::StatsHandlers;
pub use routes::stats_routes;
