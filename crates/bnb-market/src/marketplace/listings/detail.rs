use serde::Serialize;

use super::domain::Listing;

const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/800/600?random=";
const AGENT_PHONE: &str = "08012345678";
const AGENT_EMAIL: &str = "agent@bnb.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub call_link: String,
    pub email_link: String,
}

/// Everything the property detail screen renders for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDetail {
    pub listing: Listing,
    pub price_label: String,
    pub beds_label: String,
    pub type_label: String,
    pub image_url: String,
    pub contact: AgentContact,
}

impl PropertyDetail {
    pub fn for_listing(listing: &Listing) -> Self {
        // Agent directory lookups are not wired yet; every agent shares the desk line.
        let contact = AgentContact {
            name: listing.agent.clone(),
            phone: AGENT_PHONE.to_string(),
            email: AGENT_EMAIL.to_string(),
            call_link: format!("tel:{AGENT_PHONE}"),
            email_link: format!(
                "mailto:{AGENT_EMAIL}?subject=Inquiry about {}",
                listing.title
            ),
        };

        Self {
            listing: listing.clone(),
            price_label: format_naira(listing.price),
            beds_label: beds_label(listing.beds),
            type_label: format!("Type: {}", listing.property_type),
            image_url: placeholder_image(listing),
            contact,
        }
    }
}

/// `150000` renders as `₦150,000`.
pub fn format_naira(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₦{grouped}")
}

fn beds_label(beds: u32) -> String {
    if beds > 1 {
        format!("{beds} Bedrooms")
    } else {
        format!("{beds} Bedroom")
    }
}

fn placeholder_image(listing: &Listing) -> String {
    let seed = listing
        .id
        .as_str()
        .chars()
        .nth(1)
        .map(String::from)
        .unwrap_or_default();
    format!("{PLACEHOLDER_IMAGE_BASE}{seed}")
}
