//! Binding Manager - one network-triggering handler per control
//!
//! Two policies, kept separate on purpose:
//!
//! | Policy | Controls | On every selection change |
//! |--------|----------|---------------------------|
//! | [`BindingPolicy::Once`] | balance, history, submit | no-op once bound; handler reads the session at click time |
//! | [`BindingPolicy::Rebind`] | load-by-key, load-random | detach previous handler, attach one capturing the new endpoint |

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::paths::dom;

/// Click handler. Handlers spawn their own work and return immediately.
pub type Handler = Rc<dyn Fn()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    LoadPrivateKey,
    LoadRandom,
    GetBalance,
    ListTransactions,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPolicy {
    /// Attach exactly once per manager lifetime
    Once,
    /// Detach then reattach on every call
    Rebind,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::LoadPrivateKey,
        Control::LoadRandom,
        Control::GetBalance,
        Control::ListTransactions,
        Control::Submit,
    ];

    pub fn policy(&self) -> BindingPolicy {
        match self {
            Control::LoadPrivateKey | Control::LoadRandom => BindingPolicy::Rebind,
            Control::GetBalance | Control::ListTransactions | Control::Submit => BindingPolicy::Once,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::LoadPrivateKey => "derive",
            Control::LoadRandom => "generate",
            Control::GetBalance => "balance",
            Control::ListTransactions => "history",
            Control::Submit => "submit",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "derive" | "load-key" => Some(Control::LoadPrivateKey),
            "generate" | "random" => Some(Control::LoadRandom),
            "balance" => Some(Control::GetBalance),
            "history" | "transactions" => Some(Control::ListTransactions),
            "submit" | "send" => Some(Control::Submit),
            _ => None,
        }
    }

    /// Page element id of the button
    pub fn element_id(&self) -> &'static str {
        match self {
            Control::LoadPrivateKey => dom::LOAD_PRIVATE_KEY,
            Control::LoadRandom => dom::LOAD_RANDOM,
            Control::GetBalance => dom::GET_BALANCE,
            Control::ListTransactions => dom::LIST_TRANSACTIONS,
            Control::Submit => dom::SUBMIT,
        }
    }
}

/// Where handlers actually get attached (DOM, in-memory table, ...)
pub trait ControlHost {
    type Handle;
    fn attach(&self, control: Control, handler: Handler) -> Self::Handle;
    fn detach(&self, control: Control, handle: Self::Handle);
}

/// Per-control registry of what is currently attached
pub struct BindingManager<H: ControlHost> {
    host: H,
    bound: HashMap<Control, H::Handle>,
}

impl<H: ControlHost> BindingManager<H> {
    pub fn new(host: H) -> Self { Self { host, bound: HashMap::new() } }

    pub fn host(&self) -> &H { &self.host }

    /// Attach unless the control already has a handler. Returns whether it attached.
    pub fn bind(&mut self, control: Control, handler: Handler) -> bool {
        if self.bound.contains_key(&control) {
            return false;
        }
        let handle = self.host.attach(control, handler);
        self.bound.insert(control, handle);
        tracing::debug!(control = control.as_str(), "bound");
        true
    }

    /// Detach whatever is attached, then attach `handler`
    pub fn rebind(&mut self, control: Control, handler: Handler) {
        self.unbind(control);
        let handle = self.host.attach(control, handler);
        self.bound.insert(control, handle);
        tracing::debug!(control = control.as_str(), "rebound");
    }

    /// Bind with the control's own policy
    pub fn apply(&mut self, control: Control, handler: Handler) {
        match control.policy() {
            BindingPolicy::Once => {
                self.bind(control, handler);
            }
            BindingPolicy::Rebind => self.rebind(control, handler),
        }
    }

    pub fn unbind(&mut self, control: Control) -> bool {
        match self.bound.remove(&control) {
            Some(handle) => {
                self.host.detach(control, handle);
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self, control: Control) -> bool { self.bound.contains_key(&control) }
    pub fn bound_count(&self) -> usize { self.bound.len() }
}

#[derive(Default)]
struct TableState {
    next_id: u64,
    handlers: HashMap<Control, Vec<(u64, Handler)>>,
}

/// In-memory control host: the terminal console and tests "click" through it
#[derive(Clone, Default)]
pub struct HandlerTable {
    state: Rc<RefCell<TableState>>,
}

impl HandlerTable {
    pub fn new() -> Self { Self::default() }

    /// Fire every handler attached to `control`; returns how many ran
    pub fn activate(&self, control: Control) -> usize {
        let handlers: Vec<Handler> = self.state.borrow().handlers
            .get(&control)
            .map(|hs| hs.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    pub fn handler_count(&self, control: Control) -> usize {
        self.state.borrow().handlers.get(&control).map(Vec::len).unwrap_or(0)
    }
}

impl ControlHost for HandlerTable {
    type Handle = u64;

    fn attach(&self, control: Control, handler: Handler) -> u64 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.handlers.entry(control).or_default().push((id, handler));
        id
    }

    fn detach(&self, control: Control, handle: u64) {
        if let Some(hs) = self.state.borrow_mut().handlers.get_mut(&control) {
            hs.retain(|(id, _)| *id != handle);
        }
    }
}
