//! A single conversation message with optional attachment references.

use leptos::prelude::*;

use crate::state::chat::{ChatMessage, Role};

#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let is_user = message.role == Role::User;
    let files = message.files;
    view! {
        <div class="chat__row" class:chat__row--user=is_user>
            <div class="chat__bubble" class:chat__bubble--user=is_user>
                <Show when={
                    let has_text = !message.text.is_empty();
                    move || has_text
                }>
                    <div class="chat__bubble-text">{message.text.clone()}</div>
                </Show>
                <Show when={
                    let has_files = !files.is_empty();
                    move || has_files
                }>
                    <div class="chat__bubble-files">
                        {files
                            .iter()
                            .map(|f| {
                                view! { <div class="chat__bubble-file">{f.name.clone()}</div> }
                            })
                            .collect_view()}
                    </div>
                </Show>
            </div>
        </div>
    }
}
