//! Rendering of one detection result.

use api::PredictionInfo;
use dioxus::prelude::*;

/// Card showing a prediction: label, confidence, remedy, and a note when the
/// result came from the degraded fallback rather than the model.
#[component]
pub fn ResultCard(record: PredictionInfo) -> Element {
    rsx! {
        div {
            class: "result-card",
            p { class: "result-label", "Prediction: {record.disease}" }
            p { class: "result-confidence", "Confidence: {record.confidence}" }
            p { class: "result-remedy", "Suggested Remedy: {record.remedy}" }
            if record.degraded {
                p {
                    class: "result-degraded",
                    "No model is loaded - this is a placeholder result"
                }
            }
        }
    }
}
