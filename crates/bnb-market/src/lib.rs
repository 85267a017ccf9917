//! Student accommodation marketplace.
//!
//! Students search a listing catalogue, agents register and submit properties
//! for review, and the marketing site records contact requests. Identity and
//! persistence sit behind the [`marketplace::agents::AuthProvider`] and
//! [`marketplace::store::DocumentStore`] traits so hosts can plug in their own
//! backends.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
