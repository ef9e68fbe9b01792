use dioxus::prelude::*;

/// The signed-in user's secrets, oldest first, each with a delete form.
#[component]
pub fn Secrets(secrets: Vec<String>) -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "You've Discovered My Secret!" }
            if secrets.is_empty() {
                p { class: "empty", "No secrets yet." }
            }
            ul {
                class: "secret-list",
                for (index, secret) in secrets.iter().enumerate() {
                    li {
                        key: "{index}",
                        class: "secret",
                        span { "{secret}" }
                        form {
                            action: "/deleteSecret",
                            method: "post",
                            input { r#type: "hidden", name: "index", value: "{index}" }
                            button { class: "btn btn-light", r#type: "submit", "Delete" }
                        }
                    }
                }
            }
            div {
                class: "stack",
                a { class: "btn", href: "/submit", "Submit a Secret" }
                a { class: "btn btn-light", href: "/logout", "Log Out" }
            }
        }
    }
}

/// Secret submission form.
#[component]
pub fn Submit() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Secrets" }
            p { "Don't keep your secrets, share them anonymously!" }
            form {
                class: "stack",
                action: "/submit",
                method: "post",
                input {
                    r#type: "text",
                    name: "secret",
                    placeholder: "What's your secret?",
                    required: true,
                }
                button { class: "btn", r#type: "submit", "Submit" }
            }
            p {
                a { href: "/secrets", "Back to secrets" }
            }
        }
    }
}
