use dioxus::prelude::*;

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        div {
            class: "navbar",
            div { class: "logo", "🌿 CropSense" }
            div {
                class: "nav-links",
                {children}
            }
        }
    }
}
