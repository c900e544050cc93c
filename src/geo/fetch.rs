//! Asynchronous boundary-document loading.
//!
//! Uses channel-based communication to bridge the async fetch with egui's
//! synchronous update loop. The channel owns a cancellation handle: dropping
//! it aborts an in-flight request so a torn-down map is never updated.

use super::{decode_shapes, GeoError, GeoShape};
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Result of a boundary load.
pub type BoundaryResult = Result<Vec<GeoShape>, GeoError>;

/// Channel-based loader for the boundary document.
pub struct BoundaryChannel {
    sender: Sender<BoundaryResult>,
    receiver: Receiver<BoundaryResult>,
    cancelled: Arc<AtomicBool>,
    #[cfg(target_arch = "wasm32")]
    abort: Option<web_sys::AbortController>,
}

impl Default for BoundaryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            cancelled: Arc::new(AtomicBool::new(false)),
            #[cfg(target_arch = "wasm32")]
            abort: None,
        }
    }

    /// Spawns a fetch of `url` and decodes `object` from the response.
    ///
    /// On WASM the request uses `fetch` with an abort signal. On native it
    /// runs a blocking request on a background thread. Either way the
    /// decoded result is sent through the channel and a repaint requested.
    #[cfg(target_arch = "wasm32")]
    pub fn fetch(&mut self, ctx: egui::Context, url: String, object: String) {
        let sender = self.sender.clone();
        let cancelled = Arc::clone(&self.cancelled);

        let abort = web_sys::AbortController::new().ok();
        let signal = abort.as_ref().map(|a| a.signal());
        self.abort = abort;

        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_text(&url, signal.as_ref()).await {
                Ok(body) => decode_shapes(&body, &object),
                Err(e) => Err(e),
            };
            if deliver(&sender, &cancelled, result) {
                ctx.request_repaint();
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn fetch(&mut self, ctx: egui::Context, url: String, object: String) {
        let sender = self.sender.clone();
        let cancelled = Arc::clone(&self.cancelled);

        std::thread::spawn(move || {
            let result = fetch_text(&url).and_then(|body| {
                if cancelled.load(Ordering::Acquire) {
                    return Err(GeoError::Cancelled);
                }
                decode_shapes(&body, &object)
            });
            if deliver(&sender, &cancelled, result) {
                ctx.request_repaint();
            }
        });
    }

    /// Non-blocking check for a completed load.
    pub fn try_recv(&self) -> Option<BoundaryResult> {
        self.receiver.try_recv().ok()
    }

    /// Aborts any in-flight request and suppresses its result.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(abort) = self.abort.take() {
                abort.abort();
            }
        }
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for BoundaryChannel {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Sends a finished load unless the channel was cancelled or dropped.
/// Returns whether the result was delivered.
fn deliver(sender: &Sender<BoundaryResult>, cancelled: &AtomicBool, result: BoundaryResult) -> bool {
    if cancelled.load(Ordering::Acquire) {
        log::debug!("Boundary load finished after teardown; dropping result");
        return false;
    }
    sender.send(result).is_ok()
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str, signal: Option<&web_sys::AbortSignal>) -> Result<String, GeoError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let js_err = |e: wasm_bindgen::JsValue| GeoError::Network(format!("{:?}", e));

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_signal(signal);

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    let window = web_sys::window().ok_or_else(|| GeoError::Network("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| {
            if signal.is_some_and(|s| s.aborted()) {
                GeoError::Cancelled
            } else {
                js_err(e)
            }
        })?;
    let response: Response = response.dyn_into().map_err(js_err)?;
    if !response.ok() {
        return Err(GeoError::Http(response.status()));
    }

    let body = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let text: js_sys::JsString = body
        .dyn_into()
        .map_err(|_| GeoError::Parse("response body is not text".to_string()))?;
    Ok(String::from(text))
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_text(url: &str) -> Result<String, GeoError> {
    let response = reqwest::blocking::get(url).map_err(|e| GeoError::Network(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeoError::Http(status.as_u16()));
    }
    response
        .text()
        .map_err(|e| GeoError::Network(e.to_string()))
}
