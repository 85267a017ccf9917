use std::sync::Arc;

use super::agents::{AgentAuthService, AuthProvider, PropertyDesk};
use super::listings::ListingCatalog;
use super::session::RoleRouter;
use super::site::ContactDesk;
use super::store::DocumentStore;
use crate::config::MarketplaceConfig;

/// Everything the HTTP surface needs, wired to one provider and one store.
pub struct Marketplace<P, S> {
    catalog: Arc<ListingCatalog>,
    role_router: RoleRouter,
    auth: AgentAuthService<P, S>,
    properties: PropertyDesk<S>,
    contact: ContactDesk<S>,
}

impl<P, S> Marketplace<P, S>
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    pub fn new(
        catalog: ListingCatalog,
        provider: Arc<P>,
        store: Arc<S>,
        config: &MarketplaceConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            role_router: RoleRouter::new(config.redirect_delay),
            auth: AgentAuthService::new(provider, store.clone(), config.notice_ttl()),
            properties: PropertyDesk::new(store.clone()),
            contact: ContactDesk::new(store),
        }
    }

    pub fn catalog(&self) -> &ListingCatalog {
        &self.catalog
    }

    pub fn role_router(&self) -> RoleRouter {
        self.role_router
    }

    pub fn auth(&self) -> &AgentAuthService<P, S> {
        &self.auth
    }

    pub fn properties(&self) -> &PropertyDesk<S> {
        &self.properties
    }

    pub fn contact(&self) -> &ContactDesk<S> {
        &self.contact
    }
}
