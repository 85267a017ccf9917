use serde::{Deserialize, Serialize};

use super::domain::{Listing, PropertyType};

/// Type constraint; `"all"` on the wire lifts the constraint entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    /// Exact, case-sensitive match against [`PropertyType::as_str`].
    Exact(String),
}

impl TypeFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "all" {
            Self::All
        } else {
            Self::Exact(trimmed.to_string())
        }
    }

    pub fn only(kind: PropertyType) -> Self {
        Self::Exact(kind.as_str().to_string())
    }

    fn admits(&self, kind: PropertyType) -> bool {
        match self {
            Self::All => true,
            Self::Exact(tag) => tag == kind.as_str(),
        }
    }
}

/// Query-string shaped criteria as typed into the search bar and pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCriteria {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
    #[serde(default)]
    pub min_beds: Option<String>,
    #[serde(default, rename = "type")]
    pub property_type: Option<String>,
}

/// The four conjunctive predicates applied to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over title or agent; empty matches everything.
    pub query: String,
    /// Inclusive ceiling; `0` means unbounded.
    pub max_price: u64,
    /// Inclusive floor on bedroom count.
    pub min_beds: u32,
    pub property_type: TypeFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_price: 0,
            min_beds: 1,
            property_type: TypeFilter::All,
        }
    }
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_max_price(mut self, max_price: u64) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_min_beds(mut self, min_beds: u32) -> Self {
        self.min_beds = min_beds;
        self
    }

    pub fn with_type(mut self, property_type: TypeFilter) -> Self {
        self.property_type = property_type;
        self
    }

    /// Malformed numbers collapse to `0`, which leaves that predicate unbounded.
    pub fn from_raw(raw: &RawCriteria) -> Self {
        let defaults = Self::default();
        Self {
            query: raw.q.clone().unwrap_or_default(),
            max_price: raw
                .max_price
                .as_deref()
                .map(lenient_number::<u64>)
                .unwrap_or(defaults.max_price),
            min_beds: raw
                .min_beds
                .as_deref()
                .map(lenient_number::<u32>)
                .unwrap_or(defaults.min_beds),
            property_type: raw
                .property_type
                .as_deref()
                .map(TypeFilter::parse)
                .unwrap_or(defaults.property_type),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_query(listing)
            && (self.max_price == 0 || listing.price <= self.max_price)
            && listing.beds >= self.min_beds
            && self.property_type.admits(listing.property_type)
    }

    fn matches_query(&self, listing: &Listing) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.agent.to_lowercase().contains(&needle)
    }
}

/// Single stable pass; the output is a subsequence of `listings`.
pub fn filter_listings(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect()
}

fn lenient_number<T>(raw: &str) -> T
where
    T: std::str::FromStr + Default,
{
    raw.trim().parse::<T>().unwrap_or_default()
}
