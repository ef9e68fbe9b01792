use dioxus::prelude::*;

/// Landing page for anonymous visitors.
#[component]
pub fn Home() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Secrets" }
            p { "Don't keep your secrets, share them anonymously!" }
            div {
                class: "stack",
                a { class: "btn btn-light", href: "/register", "Register" }
                a { class: "btn", href: "/login", "Login" }
            }
        }
    }
}
