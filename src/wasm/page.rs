//! WalletPage: the JS-facing entry point
//!
//! ```javascript
//! import init, { WalletPage } from 'nodewallet';
//!
//! await init();
//! // Binds <select id="mySelect">; config is optional
//! const page = WalletPage.start({ probe_timeout_ms: 5000, gate_on_probe: true });
//! ```

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlSelectElement};

use super::{log, DomControls, DomSurface, FetchTransport};
use crate::app::{LocalTask, SelectOutcome, Spawner, WalletApp};
use crate::config::ClientConfig;
use crate::core::paths::dom;

type BrowserApp = WalletApp<DomSurface, FetchTransport, DomControls>;

#[wasm_bindgen]
pub struct WalletPage {
    app: Rc<BrowserApp>,
    _on_change: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl WalletPage {
    /// Build the app and listen for endpoint picker changes
    #[wasm_bindgen]
    pub fn start(config: JsValue) -> Result<WalletPage, JsValue> {
        let config: ClientConfig = if config.is_undefined() || config.is_null() {
            ClientConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        log!("[WalletPage] {} endpoints, probe timeout {} ms", config.endpoints.len(), config.probe_timeout_ms);

        let spawner: Spawner = Rc::new(|task: LocalTask| wasm_bindgen_futures::spawn_local(task));
        let app = Rc::new(WalletApp::new(
            config,
            Rc::new(DomSurface::new()?),
            Rc::new(FetchTransport::new()),
            DomControls::new()?,
            spawner,
        ));

        let select = super::document()?
            .get_element_by_id(dom::ENDPOINT_SELECT)
            .ok_or_else(|| JsValue::from_str("missing endpoint picker"))?;

        let on_change = {
            let app = app.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(value) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                    .map(|s| s.value())
                else {
                    return;
                };
                let app = app.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    app.select(&value).await;
                });
            })
        };
        select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;

        Ok(WalletPage { app, _on_change: on_change })
    }

    /// Select an endpoint programmatically. Resolves to the outcome name.
    #[wasm_bindgen]
    pub async fn select(&self, value: String) -> String {
        match self.app.select(&value).await {
            SelectOutcome::Unknown => "unknown".into(),
            SelectOutcome::Gated(probe) => probe.as_str().into(),
            SelectOutcome::Superseded(_) => "superseded".into(),
            SelectOutcome::Active { probe, .. } => format!("active:{}", probe.as_str()),
        }
    }

    /// Selection values the picker accepts
    #[wasm_bindgen]
    pub fn endpoints(&self) -> Vec<String> {
        self.app.registry().endpoints().iter().map(|e| e.id.clone()).collect()
    }

    /// Base URL of the active endpoint, if any
    #[wasm_bindgen(js_name = "activeEndpoint")]
    pub fn active_endpoint(&self) -> Option<String> {
        self.app.session().endpoint().map(|e| e.base_url)
    }
}
