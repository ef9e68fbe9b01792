use dioxus::prelude::*;

#[component]
pub fn FailedLogin() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Login failed" }
            p { "The username or password is incorrect." }
            a { class: "btn", href: "/login", "Try again" }
        }
    }
}

#[component]
pub fn FailedRegister() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Registration failed" }
            p { "That username is taken or the details were incomplete." }
            a { class: "btn", href: "/register", "Try again" }
        }
    }
}

/// Generic failure page. `message` is shown as-is and must not carry internals.
#[component]
pub fn ErrorPage(message: String) -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Something went wrong" }
            p { "{message}" }
            a { class: "btn", href: "/", "Home" }
        }
    }
}

#[component]
pub fn NotFound() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { "Not found" }
            a { class: "btn", href: "/", "Home" }
        }
    }
}
