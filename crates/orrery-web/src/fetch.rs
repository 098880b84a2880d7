//! Browser `fetch` backed implementation of [`Fetcher`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use orrery_engine::core::task::{CancelToken, Postbox};
use orrery_engine::{FetchError, FetchReply, FetchRequest, Fetcher, RequestId};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, RequestInit, Response};

/// Runs each request on the browser's microtask queue via `spawn_local`.
/// One `AbortController` per request, so a cancel tears down the transport too.
pub struct BrowserFetcher {
    controllers: Rc<RefCell<HashMap<RequestId, AbortController>>>,
}

impl BrowserFetcher {
    pub fn new() -> Self {
        Self {
            controllers: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl Default for BrowserFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for BrowserFetcher {
    fn spawn(&mut self, request: FetchRequest, postbox: Postbox<FetchReply>, token: CancelToken) {
        let FetchRequest { id, url } = request;

        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                postbox.post(FetchReply { id, body: Err(FetchError::Network(js_message(&e))) });
                return;
            }
        };
        let signal = controller.signal();
        self.controllers.borrow_mut().insert(id, controller);

        let controllers = Rc::clone(&self.controllers);
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_text(&url, &signal).await;
            controllers.borrow_mut().remove(&id);
            if token.is_cancelled() {
                log::debug!("fetch {id:?} settled after cancel");
                return;
            }
            postbox.post(FetchReply { id, body: result });
        });
    }

    fn abort(&mut self, id: RequestId) {
        if let Some(controller) = self.controllers.borrow_mut().remove(&id) {
            controller.abort();
        }
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

async fn fetch_text(url: &str, signal: &AbortSignal) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_signal(Some(signal));

    let response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await
        .map_err(|e| {
            if signal.aborted() {
                FetchError::Aborted
            } else {
                FetchError::Network(js_message(&e))
            }
        })?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| FetchError::Network(js_message(&e)))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let text = response.text().map_err(|e| FetchError::Body(js_message(&e)))?;
    let text = JsFuture::from(text).await.map_err(|e| FetchError::Body(js_message(&e)))?;
    text.as_string()
        .ok_or_else(|| FetchError::Body("response.text() was not a string".into()))
}
