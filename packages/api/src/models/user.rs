//! # User representations
//!
//! The full account record ([`store::UserRecord`]) lives server-side only and
//! carries the password. [`UserInfo`] is the client-safe projection that
//! crosses the server/client boundary via server functions and is held in the
//! session — it never includes the password. The session holds a snapshot,
//! not a live reference: profile edits go back through the store, which only
//! persists them while the email key still exists.

use serde::{Deserialize, Serialize};

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub farm_name: Option<String>,
}

impl UserInfo {
    /// Display name, falling back to the email address when the name is empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(feature = "server")]
impl From<&store::UserRecord> for UserInfo {
    fn from(record: &store::UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            mobile: record.mobile.clone(),
            farm_name: record.farm_name.clone(),
        }
    }
}
