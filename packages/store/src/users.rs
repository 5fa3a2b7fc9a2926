//! # User accounts backed by `users.json`
//!
//! [`UserStore`] holds the full email → [`UserRecord`] mapping in memory and
//! persists it by rewriting the backing file after every successful mutation.
//! There is no write locking and no atomic rename: concurrent writers race
//! (last write wins) and a crash mid-write can corrupt the file. Corruption is
//! tolerated on the next open — the store starts empty and says so in the log.
//!
//! Opening never fails. A missing file is the normal first-run state; an
//! unreadable or malformed file is an operator problem reported via
//! `tracing::warn!`, never surfaced to the end user.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::password;

/// A stored user account. Email doubles as the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
}

/// Fields a profile save may change. `None` leaves the stored value alone;
/// for the optional fields an empty string clears it. Email is the record
/// key and cannot be changed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub farm_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write credential file: {0}")]
    Persist(#[from] std::io::Error),
    #[error("could not encode credential file: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("an account with this email already exists")]
    AlreadyRegistered,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The email-keyed account map plus the path it persists to.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: HashMap<String, UserRecord>,
}

impl UserStore {
    /// Open the store at `path`. Never fails: a missing file yields an empty
    /// store silently, an unreadable or malformed file yields an empty store
    /// with an operator warning distinguishing the two cases.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let users = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        "credential file {} is malformed, starting with an empty store: {e}",
                        path.display()
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no credential file at {} yet", path.display());
                HashMap::new()
            }
            Err(e) => {
                tracing::warn!(
                    "credential file {} is unreadable, starting with an empty store: {e}",
                    path.display()
                );
                HashMap::new()
            }
        };
        Self { path, users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(email)
    }

    /// Check credentials. Succeeds iff the email exists and the password
    /// matches exactly (see [`password::verify`]). Returns a copy of the
    /// record, not a reference into the store.
    pub fn authenticate(&self, email: &str, candidate: &str) -> Option<UserRecord> {
        let record = self.users.get(email)?;
        password::verify(candidate, &record.password).then(|| record.clone())
    }

    /// Create an account and persist the whole map. Fails without any state
    /// change if the email is already taken or the file cannot be written.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<(), RegisterError> {
        if self.users.contains_key(email) {
            return Err(RegisterError::AlreadyRegistered);
        }
        self.users.insert(
            email.to_string(),
            UserRecord {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                mobile: None,
                farm_name: None,
            },
        );
        if let Err(e) = self.save() {
            self.users.remove(email);
            return Err(e.into());
        }
        Ok(())
    }

    /// Merge `fields` into the record for `email` and persist. Returns
    /// `Ok(false)` without touching the file when the email key no longer
    /// exists — a logged-in session holds a copy of its record, and an
    /// account deleted underneath it must not be resurrected by a save.
    pub fn update(&mut self, email: &str, fields: ProfileUpdate) -> Result<bool, StoreError> {
        let Some(record) = self.users.get_mut(email) else {
            return Ok(false);
        };
        if let Some(name) = fields.name {
            record.name = name;
        }
        if let Some(mobile) = fields.mobile {
            record.mobile = (!mobile.is_empty()).then_some(mobile);
        }
        if let Some(farm_name) = fields.farm_name {
            record.farm_name = (!farm_name.is_empty()).then_some(farm_name);
        }
        self.save()?;
        Ok(true)
    }

    // Full rewrite of the backing file.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.users)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cropsense_store_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn register_then_authenticate_round_trip() {
        let dir = temp_dir("roundtrip");
        let mut store = UserStore::open(dir.join("users.json"));

        store.register("Asha", "asha@x.com", "pw1").unwrap();

        let record = store.authenticate("asha@x.com", "pw1").unwrap();
        assert_eq!(record.name, "Asha");
        assert_eq!(record.email, "asha@x.com");

        assert!(store.authenticate("asha@x.com", "wrong").is_none());
        assert!(store.authenticate("nobody@x.com", "pw1").is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn duplicate_register_never_mutates() {
        let dir = temp_dir("duplicate");
        let mut store = UserStore::open(dir.join("users.json"));

        store.register("Asha", "asha@x.com", "pw1").unwrap();
        let err = store.register("Intruder", "asha@x.com", "pw2").unwrap_err();
        assert!(matches!(err, RegisterError::AlreadyRegistered));

        let record = store.get("asha@x.com").unwrap();
        assert_eq!(record.name, "Asha");
        assert_eq!(record.password, "pw1");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reopen_sees_persisted_accounts() {
        let dir = temp_dir("reopen");
        let path = dir.join("users.json");

        let mut store = UserStore::open(&path);
        store.register("Asha", "asha@x.com", "pw1").unwrap();
        drop(store);

        let store = UserStore::open(&path);
        assert_eq!(store.len(), 1);
        assert!(store.authenticate("asha@x.com", "pw1").is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_and_corrupt_files_both_start_empty() {
        let dir = temp_dir("corrupt");
        let path = dir.join("users.json");

        let store = UserStore::open(&path);
        assert!(store.is_empty());

        std::fs::write(&path, "{ not json").unwrap();
        let mut store = UserStore::open(&path);
        assert!(store.is_empty());

        // A corrupt file does not block new registrations.
        store.register("Asha", "asha@x.com", "pw1").unwrap();
        assert_eq!(store.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn update_merges_given_fields_only() {
        let dir = temp_dir("update");
        let mut store = UserStore::open(dir.join("users.json"));

        store.register("Asha", "asha@x.com", "pw1").unwrap();
        let existed = store
            .update(
                "asha@x.com",
                ProfileUpdate {
                    name: Some("Asha P".to_string()),
                    mobile: Some("9876543210".to_string()),
                    farm_name: None,
                },
            )
            .unwrap();
        assert!(existed);

        let record = store.get("asha@x.com").unwrap();
        assert_eq!(record.name, "Asha P");
        assert_eq!(record.mobile.as_deref(), Some("9876543210"));
        assert_eq!(record.farm_name, None);
        assert_eq!(record.password, "pw1");

        // Unknown email: no error, no write.
        let existed = store.update("gone@x.com", ProfileUpdate::default()).unwrap();
        assert!(!existed);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn update_with_empty_value_clears_the_field() {
        let dir = temp_dir("clear");
        let mut store = UserStore::open(dir.join("users.json"));

        store.register("Asha", "asha@x.com", "pw1").unwrap();
        store
            .update(
                "asha@x.com",
                ProfileUpdate {
                    name: None,
                    mobile: Some("9876543210".to_string()),
                    farm_name: Some("Green Acres".to_string()),
                },
            )
            .unwrap();

        // Emptying mobile erases it; omitting farm_name leaves it alone.
        store
            .update(
                "asha@x.com",
                ProfileUpdate {
                    name: None,
                    mobile: Some(String::new()),
                    farm_name: None,
                },
            )
            .unwrap();

        let record = store.get("asha@x.com").unwrap();
        assert_eq!(record.mobile, None);
        assert_eq!(record.farm_name.as_deref(), Some("Green Acres"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
