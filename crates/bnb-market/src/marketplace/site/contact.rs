use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::marketplace::store::{
    DocumentId, DocumentStore, Fields, StoreError, CONTACTS_COLLECTION,
};

/// Contact form on the marketing site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContactForm {
    fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        if !self.email.contains('@') {
            return Err(ContactError::InvalidEmail(self.email.trim().to_string()));
        }

        Ok(())
    }
}

/// Records marketing-site enquiries.
pub struct ContactDesk<S> {
    store: Arc<S>,
}

impl<S> ContactDesk<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn submit(&self, form: ContactForm, now: DateTime<Utc>) -> Result<DocumentId, ContactError> {
        form.validate()?;

        let mut fields = Fields::new();
        fields.insert("name".to_string(), json!(form.name.trim()));
        fields.insert("email".to_string(), json!(form.email.trim()));
        fields.insert("message".to_string(), json!(form.message.trim()));
        fields.insert("submittedAt".to_string(), json!(now.to_rfc3339()));

        let id = self.store.add_document(CONTACTS_COLLECTION, fields)?;
        info!(%id, "contact request recorded");
        Ok(id)
    }
}
