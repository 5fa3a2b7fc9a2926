//! # API crate — shared fullstack server functions for CropSense
//!
//! This crate defines every Dioxus server function the web frontend calls,
//! along with the supporting modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Session keys and the bounded per-session prediction history |
//! | [`models`] | — | Client-safe types (`UserInfo`, `PredictionInfo`) |
//! | [`state`] | `server` | Lazily-initialized credential store, classifier and label tables |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function,
//! annotated with `#[get(...)]` or `#[post(...)]` and compiled twice: once
//! with full server logic (behind `#[cfg(feature = "server")]`) and once as a
//! thin client stub that forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `login`, `register`, `logout`
//! - **Profile**: `update_profile`
//! - **Detection**: `detect`, `get_history`

use dioxus::prelude::*;

pub mod auth;
pub mod models;
#[cfg(feature = "server")]
pub mod state;

pub use models::{PredictionInfo, UserInfo};

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let user: Option<UserInfo> = session
        .get(auth::SESSION_USER_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(user)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password. Invalid credentials are rejected with a
/// user-visible message and no session change.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    let email = email.trim().to_string();

    let users = state::users().await.read().await;
    let Some(record) = users.authenticate(&email, &password) else {
        return Err(ServerFnError::new("Invalid email or password"));
    };
    drop(users);

    let info = UserInfo::from(&record);
    session
        .insert(auth::SESSION_USER_KEY, info.clone())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    tracing::info!("login for {email}");

    Ok(info)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new account. On success the account exists but the user is not
/// logged in; the frontend returns to the login page.
#[cfg(feature = "server")]
#[post("/api/auth/register")]
pub async fn register(name: String, email: String, password: String) -> Result<(), ServerFnError> {
    let name = name.trim().to_string();
    let email = email.trim().to_string();

    if name.is_empty() {
        return Err(ServerFnError::new("Name is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    if password.is_empty() {
        return Err(ServerFnError::new("Password is required"));
    }

    let mut users = state::users().await.write().await;
    users
        .register(&name, &email, &password)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    tracing::info!("registered account for {email}");

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(name: String, email: String, password: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by flushing the session. This clears the user
/// snapshot and the prediction history in one step.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Update the current user's profile. The edit persists only while the email
/// key still exists in the credential store; the session snapshot is
/// refreshed from the stored record on success.
#[cfg(feature = "server")]
#[post("/api/auth/profile", session: tower_sessions::Session)]
pub async fn update_profile(
    name: String,
    mobile: Option<String>,
    farm_name: Option<String>,
) -> Result<UserInfo, ServerFnError> {
    let current: Option<UserInfo> = session
        .get(auth::SESSION_USER_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let Some(current) = current else {
        return Err(ServerFnError::new("Not authenticated"));
    };

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ServerFnError::new("Name is required"));
    }

    // An empty string clears the stored field; only an absent argument
    // leaves it unchanged.
    let fields = store::ProfileUpdate {
        name: Some(name),
        mobile: mobile.map(|m| m.trim().to_string()),
        farm_name: farm_name.map(|f| f.trim().to_string()),
    };

    let mut users = state::users().await.write().await;
    let existed = users
        .update(&current.email, fields)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if !existed {
        return Err(ServerFnError::new("Account no longer exists"));
    }
    let record = users
        .get(&current.email)
        .cloned()
        .ok_or_else(|| ServerFnError::new("Account no longer exists"))?;
    drop(users);

    let info = UserInfo::from(&record);
    session
        .insert(auth::SESSION_USER_KEY, info.clone())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(info)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/profile")]
pub async fn update_profile(
    name: String,
    mobile: Option<String>,
    farm_name: Option<String>,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Run disease detection on one uploaded image (base64-encoded) and append
/// the result to the session history.
#[cfg(feature = "server")]
#[post("/api/detect", session: tower_sessions::Session)]
pub async fn detect(image_b64: String) -> Result<PredictionInfo, ServerFnError> {
    use base64::Engine as _;

    let user: Option<UserInfo> = session
        .get(auth::SESSION_USER_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    if user.is_none() {
        return Err(ServerFnError::new("Not authenticated"));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(image_b64.as_bytes())
        .map_err(|e| ServerFnError::new(format!("Invalid image payload: {e}")))?;

    // Inference is synchronous and CPU-bound; run it off the async workers.
    let engine = state::engine().await;
    let prediction =
        tokio::task::spawn_blocking(move || engine.classifier.predict(&bytes, &engine.tables))
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
    let record = PredictionInfo::from_prediction(&prediction);

    let mut history: Vec<PredictionInfo> = session
        .get(auth::SESSION_HISTORY_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .unwrap_or_default();
    auth::push_history(&mut history, record.clone());
    session
        .insert(auth::SESSION_HISTORY_KEY, history)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(record)
}

#[cfg(not(feature = "server"))]
#[post("/api/detect")]
pub async fn detect(image_b64: String) -> Result<PredictionInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Prediction history for the current session, oldest first.
#[cfg(feature = "server")]
#[get("/api/history", session: tower_sessions::Session)]
pub async fn get_history() -> Result<Vec<PredictionInfo>, ServerFnError> {
    let history: Option<Vec<PredictionInfo>> = session
        .get(auth::SESSION_HISTORY_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(history.unwrap_or_default())
}

#[cfg(not(feature = "server"))]
#[get("/api/history")]
pub async fn get_history() -> Result<Vec<PredictionInfo>, ServerFnError> {
    Ok(Vec::new())
}
