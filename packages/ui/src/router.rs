//! Page navigation as an explicit state machine, independent of the
//! rendering framework.
//!
//! Every navigation action resolves through [`resolve`], which applies the
//! authentication gate before any page logic runs. The machine has no
//! terminal state: it is re-evaluated on every navigation for as long as the
//! session lives.

use serde::{Deserialize, Serialize};

/// Pages reachable through the navigation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    Login,
    Signup,
    Logout,
    Home,
    Detect,
    About,
    Profile,
}

impl Page {
    /// Parse the navigation parameter. An absent or unknown value selects
    /// the login page.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("signup") => Page::Signup,
            Some("logout") => Page::Logout,
            Some("home") => Page::Home,
            Some("detect") => Page::Detect,
            Some("about") => Page::About,
            Some("profile") => Page::Profile,
            _ => Page::Login,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Signup => "signup",
            Page::Logout => "logout",
            Page::Home => "home",
            Page::Detect => "detect",
            Page::About => "about",
            Page::Profile => "profile",
        }
    }

    /// Whether the page sits behind the login gate.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Page::Login | Page::Signup)
    }
}

/// Resolve a requested transition against the authentication gate.
///
/// An unauthenticated session lands on the login page whatever it asked for,
/// except an explicit signup. A logout request resolves to the login page;
/// clearing the session is the caller's job.
pub fn resolve(requested: Page, logged_in: bool) -> Page {
    if !logged_in {
        return if requested == Page::Signup {
            Page::Signup
        } else {
            Page::Login
        };
    }
    match requested {
        Page::Logout => Page::Login,
        page => page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PAGES: [Page; 7] = [
        Page::Login,
        Page::Signup,
        Page::Logout,
        Page::Home,
        Page::Detect,
        Page::About,
        Page::Profile,
    ];

    #[test]
    fn unauthenticated_requests_force_login_except_signup() {
        for page in ALL_PAGES {
            let expected = if page == Page::Signup { Page::Signup } else { Page::Login };
            assert_eq!(resolve(page, false), expected, "requested {page:?}");
        }
    }

    #[test]
    fn authenticated_requests_reach_their_page() {
        for page in [Page::Home, Page::Detect, Page::About, Page::Profile] {
            assert_eq!(resolve(page, true), page);
        }
    }

    #[test]
    fn logout_resolves_to_login() {
        assert_eq!(resolve(Page::Logout, true), Page::Login);
        assert_eq!(resolve(Page::Logout, false), Page::Login);
    }

    #[test]
    fn absent_or_unknown_param_defaults_to_login() {
        assert_eq!(Page::from_param(None), Page::Login);
        assert_eq!(Page::from_param(Some("nonsense")), Page::Login);
        assert_eq!(Page::from_param(Some("detect")), Page::Detect);
    }

    #[test]
    fn param_round_trips_for_every_page() {
        for page in ALL_PAGES {
            assert_eq!(Page::from_param(Some(page.as_param())), page);
        }
    }

    #[test]
    fn only_login_and_signup_are_reachable_unauthenticated() {
        for page in ALL_PAGES {
            assert_eq!(
                page.requires_auth(),
                !matches!(page, Page::Login | Page::Signup)
            );
        }
    }
}
