//! Shared page chrome.

use dioxus::prelude::*;

const STYLE: &str = r#"
body {
    margin: 0;
    min-height: 100vh;
    background: #f4f4f4;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    color: #37352f;
}

.box {
    max-width: 400px;
    margin: 40px auto;
    background: white;
    border-radius: 6px;
    box-shadow: 0 1px 4px rgba(0, 0, 0, 0.15);
}

.heading {
    background: #a683e3;
    color: white;
    text-align: center;
    padding: 0.75rem;
}

.item {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    min-height: 3rem;
    padding: 0 1rem;
    border-bottom: 1px solid #f1f1f1;
}

.item p {
    margin: 0;
}

.item input[type="text"] {
    flex: 1;
    border: none;
    font-size: 1rem;
}

.auth-form {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 1rem;
}
"#;

/// Wrap a rendered page body in a full HTML document.
///
/// The title goes through the renderer as a text node so it is escaped like
/// any other user-supplied text.
pub(super) fn document(title: &str, body: Element) -> String {
    let title = dioxus_ssr::render_element(rsx! { "{title}" });
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html lang=\"en\">",
            "<head>",
            "<meta charset=\"utf-8\">",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "<title>{}</title>",
            "<style>{}</style>",
            "</head>",
            "<body>{}</body>",
            "</html>",
        ),
        title,
        STYLE,
        dioxus_ssr::render_element(body),
    )
}
