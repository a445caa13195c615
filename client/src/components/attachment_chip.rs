//! Pending-attachment chip with a size label and remove button.

#[cfg(test)]
#[path = "attachment_chip_test.rs"]
mod attachment_chip_test;

use leptos::prelude::*;

use crate::util::format::format_bytes;

fn chip_title(name: &str, size: u64) -> String {
    format!("{name} \u{2022} {}", format_bytes(size))
}

#[component]
pub fn AttachmentChip(
    name: String,
    size: u64,
    on_remove: Callback<()>,
) -> impl IntoView {
    let title = chip_title(&name, size);
    let size_label = format_bytes(size);
    view! {
        <div class="chat__chip" title=title>
            <span class="chat__chip-name">{name}</span>
            <span class="chat__chip-size">{size_label}</span>
            <button
                class="chat__chip-remove"
                aria-label="Remove"
                on:click=move |_| on_remove.run(())
            >
                "\u{2715}"
            </button>
        </div>
    }
}
