//! Browser microphone capture via `MediaRecorder`.
//!
//! ERROR HANDLING
//! ==============
//! Every failure surfaces as a `String` the page can show inline; a
//! missing API, denied permission, or device error never corrupts the
//! recorder state machine (the caller cancels it on error).

use crate::state::recorder::{RECORDING_FAILED_ERROR, RECORDING_UNSUPPORTED_ERROR};

/// Milliseconds since the Unix epoch, for naming captured clips.
#[must_use]
pub fn now_ms() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            js_sys::Date::now() as u64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(0))
    }
}

/// A live microphone capture. Dropping without [`stop`] leaves the
/// device open; callers route every exit through `stop` or [`abort`].
#[cfg(feature = "hydrate")]
pub struct ActiveCapture {
    recorder: web_sys::MediaRecorder,
    stream: web_sys::MediaStream,
    chunks: std::rc::Rc<std::cell::RefCell<Vec<web_sys::Blob>>>,
    _on_data: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::BlobEvent)>,
}

/// Request the microphone and start recording.
#[cfg(feature = "hydrate")]
pub async fn start() -> Result<ActiveCapture, String> {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| RECORDING_UNSUPPORTED_ERROR.to_owned())?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| RECORDING_UNSUPPORTED_ERROR.to_owned())?;

    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| RECORDING_UNSUPPORTED_ERROR.to_owned())?;
    let stream: web_sys::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|_| RECORDING_FAILED_ERROR.to_owned())?
        .dyn_into()
        .map_err(|_| RECORDING_FAILED_ERROR.to_owned())?;

    let recorder = web_sys::MediaRecorder::new(&stream)
        .map_err(|_| RECORDING_UNSUPPORTED_ERROR.to_owned())?;

    let chunks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&chunks);
    let on_data = Closure::<dyn FnMut(web_sys::BlobEvent)>::new(move |event: web_sys::BlobEvent| {
        if let Some(blob) = event.data() {
            sink.borrow_mut().push(blob);
        }
    });
    recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

    if recorder.start().is_err() {
        release_tracks(&stream);
        return Err(RECORDING_FAILED_ERROR.to_owned());
    }

    Ok(ActiveCapture { recorder, stream, chunks, _on_data: on_data })
}

/// Stop the capture and return the recorded chunks in arrival order.
/// Device tracks are released before the chunks are read.
#[cfg(feature = "hydrate")]
pub async fn stop(capture: ActiveCapture) -> Result<Vec<Vec<u8>>, String> {
    use wasm_bindgen::{JsCast, closure::Closure};
    use wasm_bindgen_futures::JsFuture;

    let (sender, receiver) = futures::channel::oneshot::channel::<()>();
    let mut sender = Some(sender);
    let on_stop = Closure::<dyn FnMut()>::new(move || {
        if let Some(sender) = sender.take() {
            let _ = sender.send(());
        }
    });
    capture.recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

    if capture.recorder.stop().is_err() {
        release_tracks(&capture.stream);
        return Err(RECORDING_FAILED_ERROR.to_owned());
    }
    // The final dataavailable fires before the stop event resolves.
    let _ = receiver.await;
    release_tracks(&capture.stream);

    let blobs: Vec<web_sys::Blob> = capture.chunks.borrow().clone();
    let mut out = Vec::with_capacity(blobs.len());
    for blob in &blobs {
        let buffer = JsFuture::from(blob.array_buffer())
            .await
            .map_err(|_| RECORDING_FAILED_ERROR.to_owned())?;
        out.push(js_sys::Uint8Array::new(&buffer).to_vec());
    }
    Ok(out)
}

/// Tear down a capture without keeping its data (chat cleared while
/// recording).
#[cfg(feature = "hydrate")]
pub fn abort(capture: &ActiveCapture) {
    let _ = capture.recorder.stop();
    release_tracks(&capture.stream);
}

#[cfg(feature = "hydrate")]
fn release_tracks(stream: &web_sys::MediaStream) {
    use wasm_bindgen::JsCast;

    for track in stream.get_tracks().iter() {
        if let Some(track) = track.dyn_ref::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}
