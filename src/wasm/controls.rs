//! DomControls - click listeners on the wallet page buttons

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use super::console_error;
use crate::core::binding::{Control, ControlHost, Handler};

pub struct DomControls {
    document: Document,
}

impl DomControls {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self { document: super::document()? })
    }
}

impl ControlHost for DomControls {
    /// The closure must outlive the listener, so the handle owns it
    type Handle = Closure<dyn FnMut()>;

    fn attach(&self, control: Control, handler: Handler) -> Self::Handle {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        match self.document.get_element_by_id(control.element_id()) {
            Some(el) => {
                if let Err(e) = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
                    console_error(&format!("attach #{} failed: {:?}", control.element_id(), e));
                }
            }
            None => console_error(&format!("missing button #{}", control.element_id())),
        }
        closure
    }

    fn detach(&self, control: Control, handle: Self::Handle) {
        if let Some(el) = self.document.get_element_by_id(control.element_id()) {
            if let Err(e) = el.remove_event_listener_with_callback("click", handle.as_ref().unchecked_ref()) {
                console_error(&format!("detach #{} failed: {:?}", control.element_id(), e));
            }
        }
    }
}
