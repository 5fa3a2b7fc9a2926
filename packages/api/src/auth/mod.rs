//! Session keys and the session-scoped prediction history.

mod session;

pub use session::{push_history, HISTORY_LIMIT, SESSION_HISTORY_KEY, SESSION_USER_KEY};
