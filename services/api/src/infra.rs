use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bnb_market::marketplace::agents::{AccountHandle, AuthError, AuthProvider, Session};
use bnb_market::marketplace::listings::{CatalogError, ListingCatalog};
use bnb_market::marketplace::session::{Navigator, Transition};
use bnb_market::marketplace::store::{DocumentId, DocumentStore, Fields, StoreError};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{debug, info};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct StoredAccount {
    uid: String,
    password: String,
}

/// Process-local identity provider that reports hosted-provider error codes.
#[derive(Default)]
pub(crate) struct InMemoryAuthProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    next_uid: AtomicU64,
}

impl AuthProvider for InMemoryAuthProvider {
    fn create_account(&self, email: &str, password: &str) -> Result<AccountHandle, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(
                "auth/weak-password",
                "Password should be at least 6 characters",
            ));
        }

        let email = email.trim().to_ascii_lowercase();
        let mut accounts = self.accounts.lock().expect("account mutex poisoned");
        if accounts.contains_key(&email) {
            return Err(AuthError::new(
                "auth/email-already-in-use",
                "The email address is already in use by another account.",
            ));
        }

        let uid = format!(
            "agent-{:06}",
            self.next_uid.fetch_add(1, Ordering::SeqCst) + 1
        );
        accounts.insert(
            email.clone(),
            StoredAccount {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );

        Ok(AccountHandle { uid, email })
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_ascii_lowercase();
        let accounts = self.accounts.lock().expect("account mutex poisoned");
        let account = accounts.get(&email).ok_or_else(|| {
            AuthError::new(
                "auth/user-not-found",
                "There is no user record corresponding to this identifier.",
            )
        })?;

        if account.password != password {
            return Err(AuthError::new(
                "auth/wrong-password",
                "The password is invalid.",
            ));
        }

        Ok(Session {
            uid: account.uid.clone(),
            email,
            signed_in_at: Utc::now(),
        })
    }
}

/// Append-only document log keyed by collection.
#[derive(Default)]
pub(crate) struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<(String, Fields)>>>,
    next_id: AtomicU64,
}

impl InMemoryDocumentStore {
    pub(crate) fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .expect("store mutex poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|(existing, _)| existing == id) {
            Some((_, current)) => *current = fields,
            None => documents.push((id.to_string(), fields)),
        }
        debug!(collection, id, "document written");
        Ok(())
    }

    fn add_document(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        let id = format!("doc-{:08}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.collections
            .lock()
            .expect("store mutex poisoned")
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), fields));
        debug!(collection, %id, "document added");
        Ok(DocumentId(id))
    }
}

/// Prints transitions instead of swapping screens.
pub(crate) struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn replace(&self, transition: Transition) {
        match &transition.user {
            Some(user) => println!("-> {} (signed in as {})", transition.screen, user.name),
            None => println!("-> {}", transition.screen),
        }
    }
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ListingCatalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = ListingCatalog::from_path(path)?;
            info!(path = %path.display(), "imported listing catalogue");
            Ok(catalog)
        }
        None => Ok(ListingCatalog::seeded()),
    }
}
