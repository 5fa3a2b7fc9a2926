//! Layout for the authenticated pages: applies the login gate, then renders
//! the navbar and the selected page.

use dioxus::prelude::*;
use ui::{use_auth, LogoutButton, Navbar};

use crate::{route_for, Route};

#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // The gate re-resolves the requested page against the session on every
    // navigation.
    let route = use_route::<Route>();
    let requested = match route {
        Route::Detect {} => ui::Page::Detect,
        Route::About {} => ui::Page::About,
        Route::Profile {} => ui::Page::Profile,
        _ => ui::Page::Home,
    };
    if !auth().loading {
        let resolved = ui::router::resolve(requested, auth().logged_in());
        if resolved != requested {
            nav.replace(route_for(resolved));
        }
    }

    let initial = auth()
        .user
        .map(|u| {
            u.display_name()
                .chars()
                .next()
                .unwrap_or('U')
                .to_uppercase()
                .to_string()
        })
        .unwrap_or_else(|| "U".to_string());

    rsx! {
        Navbar {
            Link { to: Route::Home {}, "Home" }
            Link { to: Route::Detect {}, "Detect" }
            Link { to: Route::About {}, "About" }
            Link { to: Route::Profile {}, "{initial}" }
            LogoutButton { class: "nav-logout" }
        }

        div {
            class: "page",
            Outlet::<Route> {}
        }

        div { class: "footer", "© 2026 CropSense" }
    }
}
