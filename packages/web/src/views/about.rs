use dioxus::prelude::*;

#[component]
pub fn About() -> Element {
    rsx! {
        div {
            class: "about",
            h2 { "🌿 About CropSense" }
            p { "AI-based plant disease detection for farmers." }
            p {
                "CropSense classifies a photo of a crop leaf with a "
                "pre-trained image model and suggests a remedy for the "
                "detected disease. Results from a single photo are a starting "
                "point, not a diagnosis - when in doubt, consult your local "
                "agricultural extension service."
            }
        }
    }
}
