//! Student accommodation marketplace: listings, role routing, and agent tooling.

pub mod agents;
pub mod listings;
pub mod router;
mod service;
pub mod session;
pub mod site;
pub mod store;
mod wire;

#[cfg(test)]
mod tests;

pub use router::marketplace_router;
pub use service::Marketplace;
