//! Sign-in page with the sign-in and sign-up forms.

use dioxus::prelude::*;

#[component]
pub fn SignIn() -> Element {
    rsx! {
        div {
            class: "box",
            h1 { class: "heading", "Todo List" }
            CredentialsForm { action: "/signin".to_string(), label: "Sign in".to_string() }
        }
        div {
            class: "box",
            h2 { class: "heading", "New here?" }
            CredentialsForm { action: "/signup".to_string(), label: "Sign up".to_string() }
        }
    }
}

#[component]
fn CredentialsForm(action: String, label: String) -> Element {
    rsx! {
        form {
            class: "auth-form",
            action: "{action}",
            method: "post",
            input { r#type: "text", name: "username", placeholder: "Username", required: true }
            input { r#type: "password", name: "password", placeholder: "Password", required: true }
            button { r#type: "submit", "{label}" }
        }
    }
}
