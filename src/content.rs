/// Content script: load preferences, then hide the wanted YouTube regions

use crate::descriptor::{TargetId, default_descriptors, option_names};
use crate::dom::WebDocument;
use crate::preferences::{PreferenceError, Preferences, apply_preferences};
use crate::reconciler::{PassOutcome, ReconcileConfig, ReconcileSession};
use crate::watch::{CommentsWatch, WatchOutcome};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, MutationObserver, MutationObserverInit, MutationRecord, Window};

// Import JS bridge functions
#[wasm_bindgen(module = "/content.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSyncStorage(keys: JsValue) -> Result<JsValue, JsValue>;
}

/// Entry point of the content script. Never fails into the host page.
pub fn start() {
    let Some(window) = web_sys::window() else {
        log::error!("No window, content script not started");
        return;
    };
    let Some(document) = window.document() else {
        log::error!("No document, content script not started");
        return;
    };

    spawn_local(async move {
        let options = option_names();
        log::debug!("Options are: {:?}", options);

        let loaded = load_preferences(&options).await;
        hide_with(window, document, loaded, ReconcileConfig::default()).await;
    });
}

/// Preferences are read once; later changes apply on the next page load.
async fn hide_with(
    window: Window,
    document: Document,
    loaded: Result<Preferences, PreferenceError>,
    config: ReconcileConfig,
) {
    let preferences = match loaded {
        Ok(preferences) => preferences,
        Err(e) => {
            log::error!("Error: {}", e);
            return;
        }
    };
    log::info!("Storage contains: {}", preferences.to_json());

    let session = new_session(&preferences, config);
    let hide_comments = session
        .descriptors()
        .iter()
        .any(|d| d.id == TargetId::Comments && d.desired_hidden);

    let dom = WebDocument::new(document.clone());
    if let Err(e) = watch_comments(&document, &dom, hide_comments) {
        log::error!("Failed to watch comments: {:?}", e);
    }
    run_session(session, dom, window).await;
}

async fn load_preferences(keys: &[&str]) -> Result<Preferences, PreferenceError> {
    let keys_js = serde_wasm_bindgen::to_value(keys)
        .map_err(|e| PreferenceError::Load(format!("{:?}", e)))?;

    let stored_js = getSyncStorage(keys_js)
        .await
        .map_err(|e| PreferenceError::Load(format!("{:?}", e)))?;

    let stored: serde_json::Value = serde_wasm_bindgen::from_value(stored_js)
        .map_err(|e| PreferenceError::Parse(format!("{:?}", e)))?;

    Preferences::from_value(&stored)
}

fn new_session(preferences: &Preferences, config: ReconcileConfig) -> ReconcileSession {
    let mut descriptors = default_descriptors();
    apply_preferences(&mut descriptors, preferences);
    ReconcileSession::with_config(descriptors, config)
}

/// Drive a session: one pass per animation frame, with a back-off in between
async fn run_session(mut session: ReconcileSession, dom: WebDocument, window: Window) {
    loop {
        let now = match next_animation_frame(&window).await {
            Ok(timestamp) => timestamp,
            Err(e) => {
                log::error!("Failed to schedule reconciliation: {:?}", e);
                return;
            }
        };

        match session.reconcile(&dom, now) {
            PassOutcome::Retry => TimeoutFuture::new(session.config().retry_delay_ms()).await,
            PassOutcome::Done(completion) => {
                log::debug!("Reconciliation finished: {:?}", completion);
                return;
            }
        }
    }
}

/// Resolve with the timestamp of the next animation frame
async fn next_animation_frame(window: &Window) -> Result<f64, JsValue> {
    let mut request_error = None;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(e) = window.request_animation_frame(&resolve) {
            request_error = Some(e);
        }
    });
    if let Some(e) = request_error {
        return Err(e);
    }

    let timestamp = JsFuture::from(promise).await?;
    timestamp
        .as_f64()
        .ok_or_else(|| JsValue::from_str("animation frame without timestamp"))
}

/// Watch the body for the comments section mounting; disconnects after first use
fn watch_comments(
    document: &Document,
    dom: &WebDocument,
    hide_comments: bool,
) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        return Ok(());
    };

    let dom = dom.clone();
    let mut watch = CommentsWatch::new(hide_comments);
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, observer: MutationObserver| {
            let targets: Vec<String> = records
                .iter()
                .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
                .filter(|record| record.type_() == "childList")
                .filter_map(|record| record.target())
                .map(|node| node.node_name())
                .collect();

            let outcome = watch.observe(&dom, targets.iter().map(String::as_str));
            if outcome == WatchOutcome::Disconnect {
                observer.disconnect();
            }
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let config = MutationObserverInit::new();
    config.set_attributes(false);
    config.set_child_list(true);
    config.set_subtree(true);
    observer.observe_with_options(&body, &config)?;

    callback.forget();
    Ok(())
}
