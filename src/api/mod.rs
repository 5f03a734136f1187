//! HTTP boundary for the report-insight service.
//!
//! The upload front-end and the voice agent's tools are the only clients.
//! Routes live under `/api/`; errors come back as structured JSON.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
