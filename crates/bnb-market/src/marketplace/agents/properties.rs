use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::marketplace::listings::{format_naira, PropertyType};
use crate::marketplace::store::{DocumentStore, Fields, StoreError, PROPERTIES_COLLECTION};

pub const SUBMITTED_MESSAGE: &str = "Your property listing has been submitted for review.";

const MAX_BEDROOMS: u8 = 4;

/// Raw listing form as typed by an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "crate::marketplace::wire::string_or_number")]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "crate::marketplace::wire::string_or_number")]
    pub bedrooms: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Approved,
    PendingReview,
    Rejected,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::PendingReview => "Pending Review",
            Self::Rejected => "Rejected",
        }
    }
}

/// A validated listing waiting on (or past) moderation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySubmission {
    pub id: String,
    pub agent: String,
    pub title: String,
    pub price: u64,
    pub price_label: String,
    pub description: String,
    pub location: String,
    pub bedrooms: u8,
    pub property_type: PropertyType,
    pub image_uri: String,
    pub status: SubmissionStatus,
    pub status_label: &'static str,
    pub submitted_at: DateTime<Utc>,
}

impl PropertySubmission {
    fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
        self.status_label = status.label();
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListingSummary {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please fill in all required fields and upload at least one image.")]
    MissingFields,
    #[error("price '{0}' is not a whole naira amount")]
    InvalidPrice(String),
    #[error("'{0}' is not an image file")]
    UnsupportedImage(String),
    #[error(transparent)]
    PropertyType(#[from] crate::marketplace::listings::UnknownPropertyType),
    #[error("property '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

struct ValidDraft {
    title: String,
    price: u64,
    description: String,
    location: String,
    bedrooms: u8,
    property_type: PropertyType,
    image_uri: String,
}

impl PropertyDraft {
    fn validate(self) -> Result<ValidDraft, SubmissionError> {
        let image_uri = self
            .image_uri
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty());
        let required = [&self.title, &self.price, &self.description, &self.location];
        let (Some(image_uri), true) = (
            image_uri,
            required.iter().all(|value| !value.trim().is_empty()),
        ) else {
            return Err(SubmissionError::MissingFields);
        };

        let price = self
            .price
            .trim()
            .parse::<u64>()
            .map_err(|_| SubmissionError::InvalidPrice(self.price.trim().to_string()))?;

        if !is_image(&image_uri) {
            return Err(SubmissionError::UnsupportedImage(image_uri));
        }

        let property_type = match self.property_type.as_deref().map(str::trim) {
            None | Some("") => PropertyType::Apartment,
            Some(tag) => tag.parse::<PropertyType>()?,
        };

        Ok(ValidDraft {
            title: self.title.trim().to_string(),
            price,
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            bedrooms: parse_bedrooms(&self.bedrooms),
            property_type,
            image_uri,
        })
    }
}

fn is_image(uri: &str) -> bool {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime::IMAGE)
}

/// Picker offers 1..=4 where 4 means "4+"; anything else falls back to one bedroom.
fn parse_bedrooms(raw: &str) -> u8 {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|beds| (1..=MAX_BEDROOMS).contains(beds))
        .unwrap_or(1)
}

/// Intake and management of agent listing submissions.
pub struct PropertyDesk<S> {
    store: Arc<S>,
    submissions: Mutex<Vec<PropertySubmission>>,
}

impl<S> PropertyDesk<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Validates the draft, persists it, and queues it for review.
    pub fn submit(
        &self,
        agent: &str,
        draft: PropertyDraft,
        now: DateTime<Utc>,
    ) -> Result<PropertySubmission, SubmissionError> {
        let valid = draft.validate()?;

        let mut fields = Fields::new();
        fields.insert("agent".to_string(), json!(agent));
        fields.insert("title".to_string(), json!(valid.title));
        fields.insert("price".to_string(), json!(valid.price));
        fields.insert("description".to_string(), json!(valid.description));
        fields.insert("location".to_string(), json!(valid.location));
        fields.insert("bedrooms".to_string(), json!(valid.bedrooms));
        fields.insert(
            "propertyType".to_string(),
            json!(valid.property_type.as_str()),
        );
        fields.insert("imageUri".to_string(), json!(valid.image_uri));
        fields.insert(
            "status".to_string(),
            json!(SubmissionStatus::PendingReview.label()),
        );
        fields.insert("submittedAt".to_string(), json!(now.to_rfc3339()));

        let id = self.store.add_document(PROPERTIES_COLLECTION, fields)?;

        let submission = PropertySubmission {
            id: id.0,
            agent: agent.to_string(),
            title: valid.title,
            price: valid.price,
            price_label: format_naira(valid.price),
            description: valid.description,
            location: valid.location,
            bedrooms: valid.bedrooms,
            property_type: valid.property_type,
            image_uri: valid.image_uri,
            status: SubmissionStatus::PendingReview,
            status_label: SubmissionStatus::PendingReview.label(),
            submitted_at: now,
        };

        info!(id = %submission.id, agent, "property submitted for review");
        self.lock().push(submission.clone());
        Ok(submission)
    }

    pub fn listings_for(&self, agent: &str) -> Vec<PropertySubmission> {
        self.lock()
            .iter()
            .filter(|submission| submission.agent == agent)
            .cloned()
            .collect()
    }

    pub fn summary_for(&self, agent: &str) -> ListingSummary {
        self.lock()
            .iter()
            .filter(|submission| submission.agent == agent)
            .fold(ListingSummary::default(), |mut summary, submission| {
                summary.total += 1;
                match submission.status {
                    SubmissionStatus::Approved => summary.approved += 1,
                    SubmissionStatus::PendingReview => summary.pending += 1,
                    SubmissionStatus::Rejected => summary.rejected += 1,
                }
                summary
            })
    }

    /// Records a moderation decision.
    pub fn review(
        &self,
        agent: &str,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<PropertySubmission, SubmissionError> {
        let mut guard = self.lock();
        let submission = guard
            .iter_mut()
            .find(|submission| submission.agent == agent && submission.id == id)
            .ok_or_else(|| SubmissionError::NotFound(id.to_string()))?;
        submission.set_status(status);
        Ok(submission.clone())
    }

    pub fn delete(&self, agent: &str, id: &str) -> Result<PropertySubmission, SubmissionError> {
        let mut guard = self.lock();
        let index = guard
            .iter()
            .position(|submission| submission.agent == agent && submission.id == id)
            .ok_or_else(|| SubmissionError::NotFound(id.to_string()))?;
        let removed = guard.remove(index);
        info!(id, agent, "property removed");
        Ok(removed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PropertySubmission>> {
        self.submissions.lock().expect("submission mutex poisoned")
    }
}
