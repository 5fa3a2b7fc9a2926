//! Flat-file credential store for the workspace.
//!
//! User accounts live in a single JSON object keyed by email
//! (`users.json`). The file is read in full when the store opens and
//! rewritten in full on every mutation.

pub mod password;

mod users;
pub use users::{ProfileUpdate, RegisterError, StoreError, UserRecord, UserStore};
