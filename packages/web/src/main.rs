use dioxus::prelude::*;

use ui::AuthProvider;
use views::{About, Detect, Home, Login, Profile, Shell, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[layout(Shell)]
        #[route("/home")]
        Home {},
        #[route("/detect")]
        Detect {},
        #[route("/about")]
        About {},
        #[route("/profile")]
        Profile {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Warm up the shared state so missing or corrupt data files are reported
    // at startup, not mid-request.
    {
        let users = api::state::users().await.read().await;
        tracing::info!("credential store loaded with {} account(s)", users.len());
    }
    let engine = api::state::engine().await;
    if engine.classifier.is_degraded() {
        tracing::warn!("no classifier loaded; detection runs in degraded mode");
    }

    // Sessions are in-memory and per browser session; nothing survives a
    // restart.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24).try_into().unwrap(),
        ));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .unwrap();
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` according to the authentication gate.
#[component]
fn Root() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();

    if !auth().loading {
        let target = ui::router::resolve(ui::Page::Home, auth().logged_in());
        nav.replace(route_for(target));
    }

    rsx! {}
}

/// Map a resolved page back onto the URL-level route.
pub(crate) fn route_for(page: ui::Page) -> Route {
    match page {
        ui::Page::Login | ui::Page::Logout => Route::Login {},
        ui::Page::Signup => Route::Signup {},
        ui::Page::Home => Route::Home {},
        ui::Page::Detect => Route::Detect {},
        ui::Page::About => Route::About {},
        ui::Page::Profile => Route::Profile {},
    }
}
