//! TerminalSurface - the wallet form as console state

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::app::{Field, Notice, Surface};
use crate::core::history::HistoryView;

pub struct TerminalSurface {
    fields: RefCell<HashMap<Field, String>>,
    history: RefCell<HistoryView>,
    auto_confirm: Cell<bool>,
}

impl Default for TerminalSurface {
    fn default() -> Self { Self::new(false) }
}

impl TerminalSurface {
    /// `auto_confirm` answers every prompt with yes (`--yes`)
    pub fn new(auto_confirm: bool) -> Self {
        Self { fields: RefCell::new(HashMap::new()), history: RefCell::new(HistoryView::default()), auto_confirm: Cell::new(auto_confirm) }
    }

    pub fn set_auto_confirm(&self, yes: bool) { self.auto_confirm.set(yes) }

    /// Field name/value pairs in form order
    pub fn snapshot(&self) -> Vec<(Field, String)> {
        let fields = self.fields.borrow();
        Field::ALL.iter().map(|f| (*f, fields.get(f).cloned().unwrap_or_default())).collect()
    }

    pub fn history(&self) -> HistoryView { self.history.borrow().clone() }
}

impl Surface for TerminalSurface {
    fn field(&self, field: Field) -> String {
        self.fields.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: Field, value: &str) {
        self.fields.borrow_mut().insert(field, value.to_string());
        println!("  {} = {}", field.as_str(), value);
    }

    fn notify(&self, notice: &Notice) {
        println!("! {}", notice);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.auto_confirm.get() {
            return true;
        }
        print!("{} [y/N] ", prompt);
        io::stdout().flush().ok();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn diagnostic(&self, message: &str) {
        tracing::error!(target: "diagnostic", "{}", message);
    }

    fn render_history(&self, view: &HistoryView) {
        *self.history.borrow_mut() = view.clone();
        if view.is_empty() {
            println!("(no transactions)");
        } else {
            print!("{}", view.to_text());
        }
    }
}
