use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::domain::{Listing, PropertyType};
use super::filter::{filter_listings, FilterCriteria};
use super::parser;

pub const EMPTY_RESULTS_HINT: &str =
    "No properties found matching your filters. Try adjusting your search.";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read listing catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate listing id '{0}'")]
    DuplicateId(String),
    #[error("listing '{id}' must advertise at least one bed")]
    NoBeds { id: String },
    #[error("listing '{id}' has unknown property type '{value}'")]
    UnknownPropertyType { id: String, value: String },
}

/// Immutable set of listings shown on the student dashboard.
#[derive(Debug, Clone)]
pub struct ListingCatalog {
    listings: Vec<Listing>,
}

impl ListingCatalog {
    /// Validates unique ids and `beds >= 1`, keeping the given order.
    pub fn new(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if listing.beds == 0 {
                return Err(CatalogError::NoBeds {
                    id: listing.id.0.clone(),
                });
            }
            if !seen.insert(listing.id.as_str()) {
                return Err(CatalogError::DuplicateId(listing.id.0.clone()));
            }
        }

        Ok(Self { listings })
    }

    /// The launch catalogue students see before any agent data is imported.
    pub fn seeded() -> Self {
        Self {
            listings: vec![
                Listing::new(
                    "a1",
                    "Studio Flat, 10 mins walk to Campus",
                    150_000,
                    1,
                    "Trusted Homes",
                    PropertyType::SelfContain,
                ),
                Listing::new(
                    "b2",
                    "Shared Room in 4-Bed House",
                    80_000,
                    1,
                    "Campus Connect",
                    PropertyType::Shared,
                ),
                Listing::new(
                    "c3",
                    "Executive 2-Bedroom Apartment",
                    300_000,
                    2,
                    "Premium Rentals",
                    PropertyType::Apartment,
                ),
                Listing::new(
                    "d4",
                    "Single Room, 5 mins walk to Gate",
                    100_000,
                    1,
                    "Fast Movers",
                    PropertyType::Single,
                ),
                Listing::new(
                    "e5",
                    "Large 3 Bedroom for Group of 3",
                    450_000,
                    3,
                    "Group Housing",
                    PropertyType::Apartment,
                ),
            ],
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `id,title,price,beds,agent,type` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(parser::parse_listings(reader)?)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id.as_str() == id)
    }

    pub fn search(&self, criteria: &FilterCriteria) -> SearchResults {
        SearchResults::new(self.len(), filter_listings(&self.listings, criteria))
    }
}

impl Default for ListingCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Filtered view plus the copy rendered above and below the result list.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub total: usize,
    pub count: usize,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_hint: Option<&'static str>,
    pub matches: Vec<Listing>,
}

impl SearchResults {
    fn new(total: usize, matches: Vec<Listing>) -> Self {
        let count = matches.len();
        Self {
            total,
            count,
            headline: format!("Showing {count} Matching Listings"),
            empty_hint: matches.is_empty().then_some(EMPTY_RESULTS_HINT),
            matches,
        }
    }
}

/// Options offered by the dashboard pickers. Any value is accepted by the filter.
pub mod presets {
    pub const MAX_PRICE: [(&str, &str); 4] = [
        ("Any Price", "0"),
        ("₦100k", "100000"),
        ("₦200k", "200000"),
        ("₦300k+", "300001"),
    ];

    pub const MIN_BEDS: [(&str, &str); 3] = [("1+", "1"), ("2+", "2"), ("3+", "3")];

    pub const PROPERTY_TYPE: [(&str, &str); 4] = [
        ("All", "all"),
        ("Apartment", "apartment"),
        ("Self-Cont.", "self-contain"),
        ("Shared", "shared"),
    ];
}
