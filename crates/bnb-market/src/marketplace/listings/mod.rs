//! Student-facing listing catalogue: search, filtering, and detail views.

mod catalog;
mod detail;
pub mod domain;
mod filter;
mod parser;

pub use catalog::{presets, CatalogError, ListingCatalog, SearchResults, EMPTY_RESULTS_HINT};
pub use detail::{format_naira, AgentContact, PropertyDetail};
pub use domain::{Listing, ListingId, PropertyType, UnknownPropertyType};
pub use filter::{filter_listings, FilterCriteria, RawCriteria, TypeFilter};
