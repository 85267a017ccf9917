use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::agents::{
    AgentAuthError, AgentAuthForm, AuthFormView, AuthMode, AuthOutcome, AuthProvider, Credentials,
    PropertyDraft, ProviderCode, SubmissionError, SubmissionStatus, SUBMITTED_MESSAGE,
};
use super::listings::{presets, FilterCriteria, PropertyDetail, RawCriteria};
use super::service::Marketplace;
use super::session::{logout, ProfileView, RoleRouter, Transition, User};
use super::site::{ContactError, ContactForm, SiteSearch};
use super::store::DocumentStore;

type SharedMarketplace<P, S> = Arc<Marketplace<P, S>>;

/// Router builder exposing the student, agent, and marketing-site endpoints.
pub fn marketplace_router<P, S>(marketplace: SharedMarketplace<P, S>) -> Router
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/listings", get(search_handler::<P, S>))
        .route(
            "/api/v1/listings/:listing_id",
            get(detail_handler::<P, S>),
        )
        .route("/api/v1/listing-filters", get(filter_presets_handler))
        .route("/api/v1/session/route", post(route_handler::<P, S>))
        .route("/api/v1/session/profile", post(profile_handler))
        .route("/api/v1/session/logout", post(logout_handler))
        .route("/api/v1/agents/auth", post(auth_handler::<P, S>))
        .route(
            "/api/v1/agents/:agent/properties",
            get(agent_listings_handler::<P, S>).post(submit_property_handler::<P, S>),
        )
        .route(
            "/api/v1/agents/:agent/properties/:property_id",
            delete(delete_property_handler::<P, S>),
        )
        .route(
            "/api/v1/agents/:agent/properties/:property_id/review",
            post(review_property_handler::<P, S>),
        )
        .route("/api/v1/contact", post(contact_handler::<P, S>))
        .route("/api/v1/site/search", post(site_search_handler))
        .with_state(marketplace)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub(crate) async fn search_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Query(raw): Query<RawCriteria>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    let criteria = FilterCriteria::from_raw(&raw);
    let results = marketplace.catalog().search(&criteria);
    (StatusCode::OK, Json(results)).into_response()
}

pub(crate) async fn detail_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Path(listing_id): Path<String>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    match marketplace.catalog().get(&listing_id) {
        Some(listing) => (StatusCode::OK, Json(PropertyDetail::for_listing(listing))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("listing '{listing_id}' not found"),
        ),
    }
}

fn preset_options(pairs: &[(&str, &str)]) -> Vec<serde_json::Value> {
    pairs
        .iter()
        .map(|(label, value)| json!({ "label": label, "value": value }))
        .collect()
}

pub(crate) async fn filter_presets_handler() -> Json<serde_json::Value> {
    Json(json!({
        "max_price": preset_options(&presets::MAX_PRICE),
        "min_beds": preset_options(&presets::MIN_BEDS),
        "type": preset_options(&presets::PROPERTY_TYPE),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RouteRequest {
    #[serde(default)]
    pub(crate) user: Option<User>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteResponse {
    pub(crate) transition: Transition,
    pub(crate) delay_ms: u64,
    pub(crate) loading_message: &'static str,
}

pub(crate) async fn route_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Json(request): Json<RouteRequest>,
) -> Json<RouteResponse>
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    let router = marketplace.role_router();
    let delay_ms = u64::try_from(router.delay().as_millis()).unwrap_or(u64::MAX);

    Json(RouteResponse {
        transition: router.decide(request.user),
        delay_ms,
        loading_message: RoleRouter::LOADING_MESSAGE,
    })
}

pub(crate) async fn profile_handler(Json(user): Json<User>) -> Json<ProfileView> {
    Json(ProfileView::for_user(&user))
}

pub(crate) async fn logout_handler() -> Json<Transition> {
    Json(logout())
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthRequest {
    #[serde(default)]
    pub(crate) mode: AuthMode,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthResponse {
    pub(crate) outcome: &'static str,
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) redirect: Option<&'static str>,
    pub(crate) form: AuthFormView,
}

pub(crate) async fn auth_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Json(request): Json<AuthRequest>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    let now = Utc::now();
    let mut form = AgentAuthForm::new(request.mode);
    let credentials = Credentials::new(request.email, request.password);
    let outcome = marketplace.auth().submit(&mut form, &credentials, now);
    let view = form.view(now);

    let (status, response) = match outcome {
        AuthOutcome::Registered { account, message } => (
            StatusCode::CREATED,
            AuthResponse {
                outcome: "registered",
                message: Some(message.to_string()),
                uid: Some(account.uid),
                redirect: None,
                form: view,
            },
        ),
        AuthOutcome::SignedIn { session, redirect } => (
            StatusCode::OK,
            AuthResponse {
                outcome: "signed_in",
                message: None,
                uid: Some(session.uid),
                redirect: Some(redirect),
                form: view,
            },
        ),
        AuthOutcome::Failed { error, message } => (
            auth_failure_status(&error),
            AuthResponse {
                outcome: "failed",
                message: Some(message),
                uid: None,
                redirect: None,
                form: view,
            },
        ),
    };

    (status, Json(response)).into_response()
}

fn auth_failure_status(error: &AgentAuthError) -> StatusCode {
    match error {
        AgentAuthError::Auth(err) => match err.code {
            ProviderCode::UserNotFound | ProviderCode::WrongPassword => StatusCode::UNAUTHORIZED,
            ProviderCode::EmailAlreadyInUse => StatusCode::CONFLICT,
            ProviderCode::WeakPassword => StatusCode::UNPROCESSABLE_ENTITY,
            ProviderCode::Other(_) => StatusCode::BAD_REQUEST,
        },
        AgentAuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn submission_failure(error: SubmissionError) -> Response {
    let status = match &error {
        SubmissionError::MissingFields
        | SubmissionError::InvalidPrice(_)
        | SubmissionError::UnsupportedImage(_)
        | SubmissionError::PropertyType(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionError::NotFound(_) => StatusCode::NOT_FOUND,
        SubmissionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.to_string())
}

pub(crate) async fn agent_listings_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Path(agent): Path<String>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    let desk = marketplace.properties();
    let payload = json!({
        "agent": agent,
        "summary": desk.summary_for(&agent),
        "listings": desk.listings_for(&agent),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn submit_property_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Path(agent): Path<String>,
    Json(draft): Json<PropertyDraft>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    match marketplace.properties().submit(&agent, draft, Utc::now()) {
        Ok(submission) => {
            let payload = json!({
                "message": SUBMITTED_MESSAGE,
                "submission": submission,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => submission_failure(error),
    }
}

pub(crate) async fn delete_property_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Path((agent, property_id)): Path<(String, String)>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    match marketplace.properties().delete(&agent, &property_id) {
        Ok(removed) => {
            let payload = json!({
                "id": removed.id,
                "message": format!("Property ID: {} has been removed.", removed.id),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => submission_failure(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    pub(crate) status: SubmissionStatus,
}

pub(crate) async fn review_property_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Path((agent, property_id)): Path<(String, String)>,
    Json(request): Json<ReviewRequest>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    match marketplace
        .properties()
        .review(&agent, &property_id, request.status)
    {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(error) => submission_failure(error),
    }
}

pub(crate) async fn contact_handler<P, S>(
    State(marketplace): State<SharedMarketplace<P, S>>,
    Json(form): Json<ContactForm>,
) -> Response
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    match marketplace.contact().submit(form, Utc::now()) {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(error @ (ContactError::MissingField(_) | ContactError::InvalidEmail(_))) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
        }
        Err(error @ ContactError::Store(_)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

pub(crate) async fn site_search_handler(Json(search): Json<SiteSearch>) -> Response {
    (StatusCode::OK, Json(search.feedback())).into_response()
}
