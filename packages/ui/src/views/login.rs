//! Login and registration forms with one link per enabled OAuth provider.

use api::ProviderKind;
use dioxus::prelude::*;

/// Login page component.
#[component]
pub fn Login(providers: Vec<ProviderKind>) -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Login" }
            CredentialForm { action: "/login", submit_label: "Login", new_password: false }
            ProviderLinks { providers: providers }
            p {
                "No account yet? "
                a { href: "/register", "Register" }
            }
        }
    }
}

/// Register page component.
#[component]
pub fn Register(providers: Vec<ProviderKind>) -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Register" }
            CredentialForm { action: "/register", submit_label: "Register", new_password: true }
            ProviderLinks { providers: providers }
            p {
                "Already have an account? "
                a { href: "/login", "Login" }
            }
        }
    }
}

#[component]
fn CredentialForm(action: &'static str, submit_label: &'static str, new_password: bool) -> Element {
    let password_autocomplete = if new_password { "new-password" } else { "current-password" };

    rsx! {
        form {
            class: "stack",
            action: action,
            method: "post",
            label { r#for: "username", "Username" }
            input {
                id: "username",
                r#type: "text",
                name: "username",
                autocomplete: "username",
                required: true,
            }
            label { r#for: "password", "Password" }
            input {
                id: "password",
                r#type: "password",
                name: "password",
                autocomplete: password_autocomplete,
                required: true,
            }
            button { class: "btn", r#type: "submit", "{submit_label}" }
        }
    }
}

#[component]
fn ProviderLinks(providers: Vec<ProviderKind>) -> Element {
    if providers.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "stack",
            p { "or" }
            for provider in providers {
                ProviderLink { key: "{provider}", provider: provider }
            }
        }
    }
}

/// "Sign in with ..." link starting the provider's handshake.
#[component]
pub fn ProviderLink(provider: ProviderKind) -> Element {
    let href = format!("/auth/{}", provider.slug());
    let label = format!("Sign in with {}", provider.display_name());

    rsx! {
        a { class: "btn btn-light", href: "{href}", "{label}" }
    }
}
