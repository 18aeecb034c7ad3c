//! DomSurface - wallet form inputs, alerts, and the history container

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

use super::console_error;
use crate::app::{Field, Notice, Surface};
use crate::core::history::HistoryView;
use crate::core::paths::{class, dom};

pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self { window: super::window()?, document: super::document()? })
    }

    fn input(&self, field: Field) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(field.element_id())
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn element(&self, tag: &str, class_name: &str, text: Option<&str>) -> Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        el.set_class_name(class_name);
        if text.is_some() {
            el.set_text_content(text);
        }
        Ok(el)
    }

    fn build_history(&self, container: &Element, view: &HistoryView) -> Result<(), JsValue> {
        for block in &view.blocks {
            let boxed = self.element("div", class::TRANSACTION_BOX, None)?;
            for row in &block.rows {
                let line = self.element("div", class::TRANSACTION_ROW, None)?;
                line.append_child(&self.element("span", class::LABEL, Some(row.label))?)?;
                line.append_child(&self.element("span", row.class, Some(&row.value))?)?;
                boxed.append_child(&line)?;
            }
            container.append_child(&boxed)?;
        }
        Ok(())
    }
}

impl Surface for DomSurface {
    fn field(&self, field: Field) -> String {
        self.input(field).map(|input| input.value()).unwrap_or_default()
    }

    fn set_field(&self, field: Field, value: &str) {
        match self.input(field) {
            Some(input) => input.set_value(value),
            None => console_error(&format!("missing input #{}", field.element_id())),
        }
    }

    fn notify(&self, notice: &Notice) {
        let _ = self.window.alert_with_message(&notice.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.window.confirm_with_message(prompt).unwrap_or(false)
    }

    fn diagnostic(&self, message: &str) {
        console_error(message);
    }

    fn render_history(&self, view: &HistoryView) {
        let Some(container) = self.document.get_element_by_id(dom::HISTORY_CONTAINER) else {
            console_error(&format!("missing #{}", dom::HISTORY_CONTAINER));
            return;
        };
        container.set_inner_html("");
        if let Err(e) = self.build_history(&container, view) {
            console_error(&format!("history render failed: {:?}", e));
        }
    }
}
