use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalogue listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of accommodation advertised to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    SelfContain,
    Shared,
    Single,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Apartment, Self::SelfContain, Self::Shared, Self::Single]
    }

    /// Wire tag used by filters, CSV imports, and JSON payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::SelfContain => "self-contain",
            Self::Shared => "shared",
            Self::Single => "single",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::SelfContain => "Self-Contain",
            Self::Shared => "Shared",
            Self::Single => "Single",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property type '{0}'")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownPropertyType(value.to_string()))
    }
}

/// A property record surfaced to students. Read-only once catalogued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    /// Whole naira, no minor unit.
    pub price: u64,
    pub beds: u32,
    pub agent: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

impl Listing {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        price: u64,
        beds: u32,
        agent: impl Into<String>,
        property_type: PropertyType,
    ) -> Self {
        Self {
            id: ListingId(id.into()),
            title: title.into(),
            price,
            beds,
            agent: agent.into(),
            property_type,
        }
    }
}
