//! Profile page: shows the session's user snapshot and lets the user edit
//! name, mobile and farm name. Email is the account key and stays read-only.

use dioxus::prelude::*;
use ui::use_auth;

#[component]
pub fn Profile() -> Element {
    let mut auth = use_auth();
    let mut name = use_signal(String::new);
    let mut mobile = use_signal(String::new);
    let mut farm_name = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut saved = use_signal(|| false);
    let mut saving = use_signal(|| false);

    // Prefill the form from the session snapshot once it is available.
    use_effect(move || {
        if let Some(user) = auth().user {
            name.set(user.name);
            mobile.set(user.mobile.unwrap_or_default());
            farm_name.set(user.farm_name.unwrap_or_default());
        }
    });

    let email = auth()
        .user
        .map(|u| u.email)
        .unwrap_or_default();

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            saved.set(false);

            let n = name().trim().to_string();
            if n.is_empty() {
                error.set(Some("Name is required".to_string()));
                return;
            }

            saving.set(true);
            match api::update_profile(n, Some(mobile()), Some(farm_name())).await {
                Ok(user) => {
                    let mut state = auth();
                    state.user = Some(user);
                    auth.set(state);
                    saved.set(true);
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "profile",
            h2 { "👤 User Profile" }

            form {
                onsubmit: handle_save,
                class: "auth-form",

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }
                if saved() {
                    div { class: "form-success", "Profile saved" }
                }

                label { class: "form-label", "Email" }
                input {
                    class: "form-input",
                    r#type: "email",
                    value: "{email}",
                    readonly: true,
                }

                label { class: "form-label", "Name" }
                input {
                    class: "form-input",
                    r#type: "text",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }

                label { class: "form-label", "Mobile" }
                input {
                    class: "form-input",
                    r#type: "tel",
                    value: mobile(),
                    oninput: move |evt: FormEvent| mobile.set(evt.value()),
                }

                label { class: "form-label", "Farm Name" }
                input {
                    class: "form-input",
                    r#type: "text",
                    value: farm_name(),
                    oninput: move |evt: FormEvent| farm_name.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Save" }
                }
            }

            p { class: "profile-note", "Password hidden for safety" }
        }
    }
}
