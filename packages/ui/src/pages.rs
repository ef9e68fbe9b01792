//! Full HTML documents for each route that renders a page.

use api::ProviderKind;
use dioxus::prelude::*;

use crate::render_page;
use crate::views::{
    ErrorPage, FailedLogin, FailedRegister, Home, Login, NotFound, Register, Secrets, Submit,
};

pub fn home() -> String {
    render_page("Secrets", rsx! { Home {} })
}

pub fn login(providers: Vec<ProviderKind>) -> String {
    render_page("Login", rsx! { Login { providers: providers } })
}

pub fn register(providers: Vec<ProviderKind>) -> String {
    render_page("Register", rsx! { Register { providers: providers } })
}

pub fn secrets(secrets: Vec<String>) -> String {
    render_page("Secrets", rsx! { Secrets { secrets: secrets } })
}

pub fn submit() -> String {
    render_page("Submit a Secret", rsx! { Submit {} })
}

pub fn failed_login() -> String {
    render_page("Login failed", rsx! { FailedLogin {} })
}

pub fn failed_register() -> String {
    render_page("Registration failed", rsx! { FailedRegister {} })
}

pub fn error_page(message: &str) -> String {
    let message = message.to_string();
    render_page("Error", rsx! { ErrorPage { message: message } })
}

pub fn not_found() -> String {
    render_page("Not found", rsx! { NotFound {} })
}
