use serde::{Deserialize, Serialize};

/// Hero search box on the marketing site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteSearch {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub max_distance: String,
}

/// Feedback shown after the visitor searches; the page then scrolls to features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSearchFeedback {
    pub term: String,
    pub message: String,
    pub scroll_to: &'static str,
}

impl SiteSearch {
    pub fn feedback(&self) -> SiteSearchFeedback {
        let term = self.term.trim().to_lowercase();
        let message = format!(
            "Searching for: \"{}\" with max price ₦{} and max distance {} minutes.",
            term,
            self.max_price.trim(),
            self.max_distance.trim()
        );

        SiteSearchFeedback {
            term,
            message,
            scroll_to: "Features",
        }
    }
}
