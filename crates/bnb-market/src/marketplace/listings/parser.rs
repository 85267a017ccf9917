use serde::Deserialize;
use std::io::Read;

use super::catalog::CatalogError;
use super::domain::{Listing, PropertyType};

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    title: String,
    price: u64,
    beds: u32,
    agent: String,
    #[serde(rename = "type")]
    property_type: String,
}

impl ListingRow {
    fn into_listing(self) -> Result<Listing, CatalogError> {
        let property_type = self
            .property_type
            .parse::<PropertyType>()
            .map_err(|err| CatalogError::UnknownPropertyType {
                id: self.id.clone(),
                value: err.0,
            })?;

        Ok(Listing::new(
            self.id,
            self.title,
            self.price,
            self.beds,
            self.agent,
            property_type,
        ))
    }
}

pub(crate) fn parse_listings<R: Read>(reader: R) -> Result<Vec<Listing>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for record in csv_reader.deserialize::<ListingRow>() {
        listings.push(record?.into_listing()?);
    }

    Ok(listings)
}
