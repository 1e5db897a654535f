//! A single todo list: items with a delete button each, plus the add form.

use dioxus::prelude::*;
use todo_store::Item;

#[component]
pub fn TodoListPage(title: String, items: Vec<Item>) -> Element {
    rsx! {
        div {
            class: "box",
            h1 { class: "heading", "{title}" }
            for item in items.iter() {
                form {
                    key: "{item.id}",
                    class: "item",
                    action: "/delete",
                    method: "post",
                    input { r#type: "hidden", name: "listName", value: "{title}" }
                    button { r#type: "submit", name: "checkbox", value: "{item.id}", "✓" }
                    p { "{item.name}" }
                }
            }
            form {
                class: "item",
                action: "/list",
                method: "post",
                input {
                    r#type: "text",
                    name: "newItem",
                    placeholder: "New Item",
                    autocomplete: "off",
                    autofocus: true,
                }
                button { r#type: "submit", name: "list", value: "{title}", "+" }
            }
            p {
                class: "item",
                a { href: "/logout", "Log out" }
            }
        }
    }
}
