//! This crate contains every page the secrets app renders.
//!
//! Pages are Dioxus components rendered to complete HTML documents on the
//! server. There is no client bundle: forms post back to the route controller
//! and links navigate.

use dioxus::prelude::*;

pub mod views;

mod pages;
pub use pages::{
    error_page, failed_login, failed_register, home, login, not_found, register, secrets, submit,
};

const STYLE: &str = r#"
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    color: #37352f;
    background: #ffffff;
}
.page { max-width: 640px; margin: 0 auto; padding: 3rem 1.5rem; text-align: center; }
.stack { display: flex; flex-direction: column; gap: 0.75rem; max-width: 320px; margin: 0 auto; }
.btn {
    display: inline-block;
    padding: 0.625rem 1.25rem;
    border: none;
    border-radius: 4px;
    font-size: 0.9375rem;
    cursor: pointer;
    text-decoration: none;
    background: #24292e;
    color: white;
}
.btn-light { background: #f1f1ef; color: #37352f; }
.secret-list { list-style: none; padding: 0; }
.secret { display: flex; justify-content: space-between; align-items: center; padding: 0.5rem 0; border-bottom: 1px solid #e9e9e7; }
input { padding: 0.5rem; border: 1px solid #d3d1cb; border-radius: 4px; font-size: 0.9375rem; }
"#;

/// Render `body` into a complete HTML document titled `title`.
pub fn render_page(title: &str, body: Element) -> String {
    let body = dioxus_ssr::render_element(body);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>{body}</body>\n</html>\n"
    )
}
