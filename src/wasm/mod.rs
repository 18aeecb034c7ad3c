//! WASM module: the wallet page in the browser
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        WalletPage (JS API)              │
//! │  start(config?), select, endpoints      │
//! └─────────────────┬───────────────────────┘
//!                   │  <select id="mySelect"> change
//! ┌─────────────────▼───────────────────────┐
//! │              WalletApp                  │
//! │  probe → session → bindings             │
//! └──────┬──────────────┬───────────────┬───┘
//!        │              │               │
//! ┌──────▼─────┐ ┌──────▼──────┐ ┌──────▼──────┐
//! │ DomSurface │ │ DomControls │ │FetchTransport│
//! │ inputs,    │ │ click       │ │ fetch +     │
//! │ alert      │ │ listeners   │ │ setTimeout  │
//! └────────────┘ └─────────────┘ └─────────────┘
//! ```

mod controls;
mod dom;
mod fetch;
mod page;

pub use controls::DomControls;
pub use dom::DomSurface;
pub use fetch::FetchTransport;
pub use page::WalletPage;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Error line in the browser console
pub fn console_error(s: &str) {
    web_sys::console::error_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;

pub(crate) fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub(crate) fn document() -> Result<web_sys::Document, JsValue> {
    window()?.document().ok_or_else(|| JsValue::from_str("no document"))
}
