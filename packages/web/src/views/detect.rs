//! Detection page: image acquisition, one prediction per submission, and the
//! session history.

use base64::Engine as _;
use dioxus::prelude::*;
use ui::ResultCard;

/// Detect page component. Two acquisition inputs are offered — file upload
/// and live capture — and exactly one image goes to the classifier per
/// submission, the uploaded file taking precedence when both are present.
#[component]
pub fn Detect() -> Element {
    let mut uploaded = use_signal(|| Option::<(String, Vec<u8>)>::None);
    let mut captured = use_signal(|| Option::<(String, Vec<u8>)>::None);
    let mut result = use_signal(|| Option::<api::PredictionInfo>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut analyzing = use_signal(|| false);

    let mut history = use_resource(move || async move {
        api::get_history().await.unwrap_or_default()
    });

    let read_into = |mut slot: Signal<Option<(String, Vec<u8>)>>, mut error: Signal<Option<String>>| {
        move |evt: FormEvent| async move {
            if let Some(file) = evt.files().into_iter().next() {
                match file.read_bytes().await {
                    Ok(bytes) => slot.set(Some((file.name(), bytes.to_vec()))),
                    Err(e) => error.set(Some(format!("Could not read image: {e}"))),
                }
            }
        }
    };

    let handle_analyze = move |_| {
        spawn(async move {
            error.set(None);

            // Upload wins when both inputs hold an image.
            let Some((_, bytes)) = uploaded().or_else(|| captured()) else {
                error.set(Some("Choose or capture an image first".to_string()));
                return;
            };

            analyzing.set(true);
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            match api::detect(encoded).await {
                Ok(record) => {
                    result.set(Some(record));
                    history.restart();
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            analyzing.set(false);
        });
    };

    rsx! {
        div {
            class: "detect",
            h2 { "📸 AI Crop Disease Detection" }

            div {
                class: "detect-inputs",
                label {
                    class: "detect-input",
                    "Upload Crop Image"
                    input {
                        r#type: "file",
                        accept: "image/jpeg,image/png",
                        onchange: read_into(uploaded, error),
                    }
                    if let Some((file_name, _)) = uploaded() {
                        span { class: "detect-filename", "{file_name}" }
                    }
                }
                label {
                    class: "detect-input",
                    "Or Take Picture"
                    input {
                        r#type: "file",
                        accept: "image/*",
                        capture: "environment",
                        onchange: read_into(captured, error),
                    }
                    if let Some((file_name, _)) = captured() {
                        span { class: "detect-filename", "{file_name}" }
                    }
                }
            }

            button {
                class: "btn btn-primary",
                disabled: analyzing(),
                onclick: handle_analyze,
                if analyzing() { "Analyzing..." } else { "Analyze" }
            }

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            if let Some(record) = result() {
                ResultCard { record }
            }

            if let Some(entries) = history() {
                if !entries.is_empty() {
                    div {
                        class: "history",
                        h3 { "This Session" }
                        table {
                            thead {
                                tr {
                                    th { "Time" }
                                    th { "Disease" }
                                    th { "Confidence" }
                                }
                            }
                            tbody {
                                for entry in entries.iter().rev() {
                                    tr {
                                        td { "{entry.datetime}" }
                                        td { "{entry.disease}" }
                                        td { "{entry.confidence}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
