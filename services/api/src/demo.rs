use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bnb_market::config::MarketplaceConfig;
use bnb_market::error::AppError;
use bnb_market::marketplace::agents::{
    AgentAuthForm, AuthMode, AuthOutcome, Credentials, PropertyDraft, SubmissionStatus,
};
use bnb_market::marketplace::listings::{
    format_naira, FilterCriteria, PropertyDetail, RawCriteria, SearchResults,
};
use bnb_market::marketplace::session::{ProfileView, RoleRouter, User};
use bnb_market::marketplace::site::ContactForm;
use bnb_market::marketplace::store::{AGENTS_COLLECTION, CONTACTS_COLLECTION, PROPERTIES_COLLECTION};
use bnb_market::marketplace::Marketplace;
use chrono::Utc;
use clap::Args;

use crate::infra::{load_catalog, ConsoleNavigator, InMemoryAuthProvider, InMemoryDocumentStore};

#[derive(Args, Debug, Default)]
pub(crate) struct ListingSearchArgs {
    /// Case-insensitive text matched against title or agent
    #[arg(long, short)]
    pub(crate) query: Option<String>,
    /// Inclusive price ceiling in naira (0 = any price)
    #[arg(long)]
    pub(crate) max_price: Option<String>,
    /// Minimum number of bedrooms
    #[arg(long)]
    pub(crate) min_beds: Option<String>,
    /// Property type tag, or "all"
    #[arg(long = "type")]
    pub(crate) property_type: Option<String>,
    /// CSV catalogue to search instead of the seeded listings
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
    /// Print the raw JSON payload
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RouteArgs {
    /// Role tag on the signed-in user; omit to simulate a missing session
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Display name for the simulated user
    #[arg(long, default_value = "Test User")]
    pub(crate) name: String,
    /// Cosmetic pause before redirecting
    #[arg(long, default_value_t = 1000)]
    pub(crate) delay_ms: u64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV catalogue to use instead of the seeded listings
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
    /// Skip the agent onboarding portion of the demo
    #[arg(long)]
    pub(crate) skip_agent: bool,
}

pub(crate) fn run_listing_search(args: ListingSearchArgs) -> Result<(), AppError> {
    let ListingSearchArgs {
        query,
        max_price,
        min_beds,
        property_type,
        listings_csv,
        json,
    } = args;

    let catalog = load_catalog(listings_csv.as_deref())?;
    let criteria = FilterCriteria::from_raw(&RawCriteria {
        q: query,
        max_price,
        min_beds,
        property_type,
    });
    let results = catalog.search(&criteria);

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Search payload unavailable: {err}"),
        }
    } else {
        render_results(&results);
    }

    Ok(())
}

pub(crate) async fn run_route(args: RouteArgs) -> Result<(), AppError> {
    let user = args.role.map(|role| User::new("cli-user", args.name, role));
    if let Some(user) = &user {
        let profile = ProfileView::for_user(user);
        println!("{} ({})", profile.name, profile.role_label);
    }

    let router = RoleRouter::new(Duration::from_millis(args.delay_ms));
    println!("{}", RoleRouter::LOADING_MESSAGE);

    let pending = router.schedule(user, Arc::new(ConsoleNavigator));
    if !pending.completed().await {
        println!("Redirect cancelled before it fired");
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        listings_csv,
        skip_agent,
    } = args;

    let store = Arc::new(InMemoryDocumentStore::default());
    let marketplace = Marketplace::new(
        load_catalog(listings_csv.as_deref())?,
        Arc::new(InMemoryAuthProvider::default()),
        store.clone(),
        &MarketplaceConfig::default(),
    );
    let now = Utc::now();

    println!("Student search demo");
    let budget = FilterCriteria::default().with_max_price(200_000);
    println!("- Budget up to ₦200,000:");
    let results = marketplace.catalog().search(&budget);
    render_results(&results);

    if let Some(first) = results.matches.first() {
        let detail = PropertyDetail::for_listing(first);
        println!(
            "\nDetail for {}: {} | {} | {}",
            first.id, detail.price_label, detail.beds_label, detail.type_label
        );
        println!(
            "  Contact {} via {} or {}",
            detail.contact.name, detail.contact.call_link, detail.contact.email_link
        );
    }

    if !skip_agent {
        println!("\nAgent onboarding demo");
        let credentials = Credentials::new("demo.agent@bnb.com", "campus-keys");
        let mut form = AgentAuthForm::new(AuthMode::Register);

        for _ in 0..2 {
            let attempt = form.mode();
            match marketplace.auth().submit(&mut form, &credentials, now) {
                AuthOutcome::Registered { account, message } => {
                    println!("- {}: {} ({})", attempt.heading(), message, account.uid);
                }
                AuthOutcome::SignedIn { session, redirect } => {
                    println!("- {}: {} -> {}", attempt.heading(), session.uid, redirect);

                    let draft = PropertyDraft {
                        title: "Ensuite room by the library".to_string(),
                        price: "135000".to_string(),
                        description: "Water and light included".to_string(),
                        location: "Hostel Road".to_string(),
                        bedrooms: "1".to_string(),
                        property_type: Some("single".to_string()),
                        image_uri: Some("file:///demo/ensuite.jpg".to_string()),
                    };
                    match marketplace.properties().submit(&session.uid, draft, now) {
                        Ok(submission) => {
                            println!(
                                "  Submitted {} at {} -> {}",
                                submission.title, submission.price_label, submission.status_label
                            );
                            if let Ok(reviewed) = marketplace.properties().review(
                                &session.uid,
                                &submission.id,
                                SubmissionStatus::Approved,
                            ) {
                                println!("  Moderation: {}", reviewed.status_label);
                            }
                            let summary = marketplace.properties().summary_for(&session.uid);
                            println!(
                                "  Dashboard: {} total | {} approved | {} pending | {} rejected",
                                summary.total, summary.approved, summary.pending, summary.rejected
                            );
                        }
                        Err(err) => println!("  Submission rejected: {err}"),
                    }
                }
                AuthOutcome::Failed { message, .. } => {
                    println!("- {}: {}", attempt.heading(), message);
                    break;
                }
            }
        }
    }

    println!("\nMarketing site demo");
    let enquiry = ContactForm {
        name: "Demo Visitor".to_string(),
        email: "visitor@example.com".to_string(),
        message: "Do you have listings close to the engineering faculty?".to_string(),
    };
    match marketplace.contact().submit(enquiry, now) {
        Ok(id) => println!("- Contact request recorded as {id}"),
        Err(err) => println!("- Contact request failed: {err}"),
    }

    println!(
        "\nDocuments written: {} agents | {} properties | {} contacts",
        store.count(AGENTS_COLLECTION),
        store.count(PROPERTIES_COLLECTION),
        store.count(CONTACTS_COLLECTION)
    );

    Ok(())
}

fn render_results(results: &SearchResults) {
    println!("{}", results.headline);
    if let Some(hint) = results.empty_hint {
        println!("  {hint}");
    }
    for listing in &results.matches {
        println!(
            "  - [{}] {} | {} | {} bed(s) | {} | {}",
            listing.id,
            listing.title,
            format_naira(listing.price),
            listing.beds,
            listing.property_type.label(),
            listing.agent
        );
    }
}
