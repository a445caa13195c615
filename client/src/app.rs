//! Root application component.

use leptos::prelude::*;

use crate::pages::chat::ChatPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <ChatPage />
        </main>
    }
}
