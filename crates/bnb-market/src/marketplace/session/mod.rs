//! Post-login routing: role decisions, the delayed hand-off, and profile views.

mod profile;
mod redirect;
mod role;

pub use profile::{logout, ProfileView};
pub use redirect::{Navigator, PendingRedirect, RoleRouter};
pub use role::{route, transition_for, Destination, Role, Transition, User};
