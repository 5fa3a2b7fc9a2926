use dioxus::prelude::*;
use ui::use_auth;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let name = auth()
        .user
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "hero",
            h1 { "Welcome, {name} 👋" }
            p { "AI-powered Crop Health Assistant" }
            p {
                class: "hero-hint",
                "Upload a crop-leaf photo on the Detect page to get a disease "
                "label, a confidence score and a suggested remedy."
            }
        }
    }
}
