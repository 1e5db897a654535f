//! Server-rendered pages.

use dioxus::prelude::*;
use todo_store::TodoList;

mod layout;
use layout::document;

mod sign_in;
pub use sign_in::SignIn;

mod list;
pub use list::TodoListPage;

/// Render the sign-in page to an HTML document.
pub fn render_sign_in() -> String {
    document("Sign in", rsx! { SignIn {} })
}

/// Render one list to an HTML document.
pub fn render_list(list: &TodoList) -> String {
    document(&list.name, rsx! {
        TodoListPage { title: list.name.clone(), items: list.items.clone() }
    })
}
