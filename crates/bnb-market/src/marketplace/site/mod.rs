//! Marketing website endpoints.

mod contact;
mod search;

pub use contact::{ContactDesk, ContactError, ContactForm};
pub use search::{SiteSearch, SiteSearchFeedback};
