//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod navbar;
pub use navbar::Navbar;

pub mod router;
pub use router::Page;

mod result_card;
pub use result_card::ResultCard;
