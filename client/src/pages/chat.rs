//! The chat page: conversation log, composer, capture surfaces.
//!
//! DESIGN
//! ======
//! All state transitions go through `ChatState`/`Recorder`; this page only
//! wires browser events to those methods and runs the async send. Preview
//! object URLs are revoked whenever their attachment leaves the pending
//! list (removal, send consumption, or chat clearing).

use leptos::prelude::*;

use crate::components::attachment_chip::AttachmentChip;
use crate::components::file_preview::FilePreview;
use crate::components::message_bubble::MessageBubble;
use crate::net::api;
use crate::state::chat::{ChatState, Transport};
use crate::state::recorder::Recorder;
use crate::util::files;

#[component]
pub fn ChatPage() -> impl IntoView {
    let chat = RwSignal::new(ChatState::new());
    let recorder = RwSignal::new(Recorder::new());
    #[cfg(feature = "hydrate")]
    let capture = StoredValue::new_local(None::<crate::util::audio::ActiveCapture>);

    let do_send = move || {
        let Some(ticket) = chat.try_update(ChatState::begin_send).flatten() else {
            return;
        };
        // Previews are for the composer; the sent bubble shows names only.
        files::revoke_previews(&ticket.attachments);
        leptos::task::spawn_local(async move {
            let outcome = match ticket.transport {
                Transport::Json => {
                    api::send_text(&ticket.prompt).await.map(|r| (r.text, Vec::new()))
                }
                Transport::Multipart => api::send_multimodal(&ticket.prompt, &ticket.attachments)
                    .await
                    .map(|r| (r.text, api::reply_attachments(r.files))),
            };
            chat.update(|c| match (ticket.transport, outcome) {
                (_, Err(e)) => c.fail_send(&ticket, &e),
                (Transport::Json, Ok((text, _))) => c.complete_text(&text),
                (Transport::Multipart, Ok((text, reply_files))) => {
                    c.complete_multimodal(&text, reply_files);
                }
            });
        });
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input: web_sys::HtmlInputElement = event_target(&ev);
            if let Some(list) = input.files() {
                leptos::task::spawn_local(async move {
                    let added = files::pending_from_file_list(&list).await;
                    chat.update(|c| c.add_files(added));
                });
            }
            // Allow re-picking the same file.
            input.set_value("");
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_dragover = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        chat.update(|c| c.drag_over = true);
    };
    let on_dragleave = move |_| chat.update(|c| c.drag_over = false);
    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        chat.update(|c| c.drag_over = false);
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let added = files::pending_from_drop(&ev).await;
                if !added.is_empty() {
                    chat.update(|c| c.add_files(added));
                }
            });
        }
    };

    let on_paste = move |ev: leptos::ev::ClipboardEvent| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let added = files::pending_from_paste(&ev).await;
                if !added.is_empty() {
                    chat.update(|c| c.add_files(added));
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let toggle_record = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::audio;

            if recorder.with_untracked(Recorder::is_recording) {
                let Some(active) = capture.try_update_value(Option::take).flatten() else {
                    recorder.update(Recorder::cancel);
                    return;
                };
                leptos::task::spawn_local(async move {
                    match audio::stop(active).await {
                        Ok(chunks) => {
                            let clip = recorder.try_update(|r| {
                                for chunk in chunks {
                                    r.push_chunk(chunk);
                                }
                                r.finish(audio::now_ms())
                            });
                            if let Some(Some(clip)) = clip {
                                chat.update(|c| c.add_files(vec![clip]));
                            }
                        }
                        Err(e) => {
                            recorder.update(Recorder::cancel);
                            chat.update(|c| c.error = e);
                        }
                    }
                });
            } else {
                if recorder.try_update(|r| r.start().is_ok()) != Some(true) {
                    return;
                }
                leptos::task::spawn_local(async move {
                    match audio::start().await {
                        Ok(active) => capture.set_value(Some(active)),
                        Err(e) => {
                            recorder.update(Recorder::cancel);
                            chat.update(|c| c.error = e);
                        }
                    }
                });
            }
        }
    };

    let clear_chat = move |_| {
        // A recording in progress is discarded along with the conversation.
        #[cfg(feature = "hydrate")]
        if let Some(active) = capture.try_update_value(Option::take).flatten() {
            crate::util::audio::abort(&active);
        }
        recorder.update(Recorder::cancel);
        if let Some(dropped) = chat.try_update(ChatState::clear_chat) {
            files::revoke_previews(&dropped);
        }
    };

    let remove_pending = move |index: usize| {
        if let Some(removed) = chat.try_update(|c| c.remove_file(index)).flatten() {
            files::revoke_preview(&removed);
        }
    };

    view! {
        <div class="chat">
            <header class="chat__header">
                <div class="chat__title">"Multimodal Chat"</div>
                <button class="chat__new" on:click=clear_chat>
                    "New Chat"
                </button>
            </header>

            <div class="chat__log">
                {move || {
                    chat.with(|c| {
                        c.messages
                            .iter()
                            .map(|m| view! { <MessageBubble message=m.clone() /> })
                            .collect_view()
                    })
                }}
                <Show when=move || chat.with(|c| c.sending)>
                    <div class="chat__typing">"Thinking\u{2026}"</div>
                </Show>
            </div>

            <Show when=move || chat.with(|c| !c.error.is_empty())>
                <div class="chat__error">{move || chat.with(|c| c.error.clone())}</div>
            </Show>

            <div
                class="chat__composer"
                class:chat__composer--dragover=move || chat.with(|c| c.drag_over)
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
                on:paste=on_paste
            >
                <Show when=move || chat.with(|c| !c.pending.is_empty())>
                    <div class="chat__chips">
                        {move || {
                            chat.with(|c| {
                                c.pending
                                    .iter()
                                    .enumerate()
                                    .map(|(index, p)| {
                                        view! {
                                            <AttachmentChip
                                                name=p.name.clone()
                                                size=p.size
                                                on_remove=Callback::new(move |()| remove_pending(index))
                                            />
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </div>
                    <div class="chat__previews">
                        {move || {
                            chat.with(|c| {
                                c.pending
                                    .iter()
                                    .map(|p| {
                                        view! {
                                            <FilePreview
                                                name=p.name.clone()
                                                mime_type=p.mime_type.clone()
                                                preview_uri=p.preview_uri.clone()
                                            />
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </div>
                </Show>

                <textarea
                    class="chat__input"
                    placeholder="Type a message. You can also paste images or screenshots here\u{2026}"
                    prop:value=move || chat.with(|c| c.input.clone())
                    on:input=move |ev| chat.update(|c| c.input = event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>

                <div class="chat__actions">
                    <label class="chat__attach">
                        "Attach"
                        <input
                            class="chat__file-input"
                            type="file"
                            multiple
                            accept=files::FILE_ACCEPT
                            on:change=on_pick
                        />
                    </label>
                    <button
                        class="chat__record"
                        class:chat__record--live=move || recorder.with(Recorder::is_recording)
                        on:click=toggle_record
                    >
                        {move || {
                            if recorder.with(Recorder::is_recording) { "Stop" } else { "Record" }
                        }}
                    </button>
                    <button
                        class="chat__send"
                        prop:disabled=move || chat.with(|c| c.sending)
                        on:click=move |_| do_send()
                    >
                        "Send"
                    </button>
                </div>
            </div>
        </div>
    }
}
