use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::MarketplaceConfig;
use crate::marketplace::agents::{AccountHandle, AuthError, AuthProvider, Session};
use crate::marketplace::listings::ListingCatalog;
use crate::marketplace::session::{Navigator, Transition};
use crate::marketplace::store::{DocumentId, DocumentStore, Fields, StoreError};
use crate::marketplace::Marketplace;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn config() -> MarketplaceConfig {
    MarketplaceConfig {
        redirect_delay: Duration::from_millis(1000),
        notice_ttl_secs: 5,
        listings_csv: None,
    }
}

/// Provider backed by a map of email to password.
#[derive(Default)]
pub(super) struct MemoryProvider {
    accounts: Mutex<HashMap<String, (String, String)>>,
    next_uid: AtomicU64,
}

impl MemoryProvider {
    pub(super) fn with_account(email: &str, password: &str) -> Self {
        let provider = Self::default();
        provider
            .create_account(email, password)
            .expect("seed account");
        provider
    }
}

impl AuthProvider for MemoryProvider {
    fn create_account(&self, email: &str, password: &str) -> Result<AccountHandle, AuthError> {
        if password.len() < 6 {
            return Err(AuthError::new(
                "auth/weak-password",
                "Password should be at least 6 characters",
            ));
        }

        let mut accounts = self.accounts.lock().expect("account mutex poisoned");
        if accounts.contains_key(email) {
            return Err(AuthError::new(
                "auth/email-already-in-use",
                "The email address is already in use by another account.",
            ));
        }

        let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::SeqCst) + 1);
        accounts.insert(email.to_string(), (uid.clone(), password.to_string()));
        Ok(AccountHandle {
            uid,
            email: email.to_string(),
        })
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self.accounts.lock().expect("account mutex poisoned");
        match accounts.get(email) {
            None => Err(AuthError::new("auth/user-not-found", "no user record")),
            Some((_, stored)) if stored != password => {
                Err(AuthError::new("auth/wrong-password", "password is invalid"))
            }
            Some((uid, _)) => Ok(Session {
                uid: uid.clone(),
                email: email.to_string(),
                signed_in_at: now(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct StoredWrite {
    pub(super) collection: String,
    pub(super) id: String,
    pub(super) fields: Fields,
}

#[derive(Default)]
pub(super) struct MemoryStore {
    writes: Mutex<Vec<StoredWrite>>,
}

impl MemoryStore {
    pub(super) fn writes(&self) -> Vec<StoredWrite> {
        self.writes.lock().expect("store mutex poisoned").clone()
    }

    pub(super) fn in_collection(&self, collection: &str) -> Vec<StoredWrite> {
        self.writes()
            .into_iter()
            .filter(|write| write.collection == collection)
            .collect()
    }
}

impl DocumentStore for MemoryStore {
    fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.writes
            .lock()
            .expect("store mutex poisoned")
            .push(StoredWrite {
                collection: collection.to_string(),
                id: id.to_string(),
                fields,
            });
        Ok(())
    }

    fn add_document(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        let mut writes = self.writes.lock().expect("store mutex poisoned");
        let id = format!("{collection}-{}", writes.len() + 1);
        writes.push(StoredWrite {
            collection: collection.to_string(),
            id: id.clone(),
            fields,
        });
        Ok(DocumentId(id))
    }
}

pub(super) struct UnavailableStore;

impl DocumentStore for UnavailableStore {
    fn set_document(&self, _collection: &str, _id: &str, _fields: Fields) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }

    fn add_document(&self, _collection: &str, _fields: Fields) -> Result<DocumentId, StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingNavigator {
    replaced: Mutex<Vec<Transition>>,
}

impl RecordingNavigator {
    pub(super) fn transitions(&self) -> Vec<Transition> {
        self.replaced.lock().expect("navigator mutex poisoned").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, transition: Transition) {
        self.replaced
            .lock()
            .expect("navigator mutex poisoned")
            .push(transition);
    }
}

pub(super) fn marketplace<P, S>(provider: P, store: Arc<S>) -> Arc<Marketplace<P, S>>
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    Arc::new(Marketplace::new(
        ListingCatalog::seeded(),
        Arc::new(provider),
        store,
        &config(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
