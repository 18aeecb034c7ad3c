//! WalletApp - endpoint selection, probing, and handler wiring

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::operations::Operations;
use super::{Notice, Spawner, Surface};
use crate::client::Transport;
use crate::config::ClientConfig;
use crate::core::binding::{BindingManager, BindingPolicy, Control, ControlHost, Handler};
use crate::core::endpoint::EndpointRegistry;
use crate::core::probe::{probe, ProbeOutcome};
use crate::core::session::{Session, SessionHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not in the registry; nothing happened
    Unknown,
    /// Probe failed and gating is on; no session is active
    Gated(ProbeOutcome),
    /// Session activated and handlers wired
    Active { session: Session, probe: ProbeOutcome },
    /// A newer selection started while this one was probing; its result was dropped
    Superseded(ProbeOutcome),
}

pub struct WalletApp<S, T, H: ControlHost> {
    config: ClientConfig,
    registry: EndpointRegistry,
    session: SessionHandle,
    bindings: RefCell<BindingManager<H>>,
    ops: Operations<S, T>,
    spawner: Spawner,
}

impl<S: Surface + 'static, T: Transport + 'static, H: ControlHost> WalletApp<S, T, H> {
    pub fn new(config: ClientConfig, surface: Rc<S>, transport: Rc<T>, host: H, spawner: Spawner) -> Self {
        Self {
            registry: config.registry(),
            config,
            session: SessionHandle::new(),
            bindings: RefCell::new(BindingManager::new(host)),
            ops: Operations::new(surface, transport),
            spawner,
        }
    }

    pub fn config(&self) -> &ClientConfig { &self.config }
    pub fn registry(&self) -> &EndpointRegistry { &self.registry }
    pub fn session(&self) -> &SessionHandle { &self.session }
    pub fn operations(&self) -> &Operations<S, T> { &self.ops }
    pub fn bindings(&self) -> Ref<'_, BindingManager<H>> { self.bindings.borrow() }

    /// Handle a change of the endpoint picker
    pub async fn select(&self, selection: &str) -> SelectOutcome {
        let Some(endpoint) = self.registry.resolve(selection).cloned() else {
            tracing::debug!(selection, "unknown endpoint selection ignored");
            self.ops.surface().diagnostic(&format!("unknown endpoint: {}", selection));
            return SelectOutcome::Unknown;
        };

        let ticket = self.session.begin_selection();
        let outcome = probe(&**self.ops.transport(), &endpoint, self.config.probe_timeout()).await;
        if !self.session.is_latest(ticket) {
            tracing::debug!(endpoint = %endpoint.base_url, outcome = outcome.as_str(), "selection superseded");
            return SelectOutcome::Superseded(outcome);
        }

        let surface = self.ops.surface();
        match outcome {
            ProbeOutcome::Reachable => surface.notify(&Notice::Connected(endpoint.base_url.clone())),
            ProbeOutcome::Unreachable => surface.notify(&Notice::ConnectionFailed),
            ProbeOutcome::TimedOut => surface.notify(&Notice::ConnectionTimedOut),
        }

        if self.config.gate_on_probe && !outcome.is_reachable() {
            self.release();
            return SelectOutcome::Gated(outcome);
        }

        let session = self.session.activate(endpoint);
        tracing::info!(endpoint = %session.endpoint.base_url, generation = session.generation, "endpoint active");
        self.wire(&session);
        SelectOutcome::Active { session, probe: outcome }
    }

    /// Drop the session and every handler that captured its endpoint
    fn release(&self) {
        self.session.deactivate();
        let mut bindings = self.bindings.borrow_mut();
        for control in Control::ALL.into_iter().filter(|c| c.policy() == BindingPolicy::Rebind) {
            bindings.unbind(control);
        }
    }

    fn wire(&self, session: &Session) {
        let mut bindings = self.bindings.borrow_mut();
        for control in Control::ALL {
            bindings.apply(control, self.handler(control, session));
        }
    }

    fn handler(&self, control: Control, session: &Session) -> Handler {
        let ops = self.ops.clone();
        let spawner = self.spawner.clone();
        match control.policy() {
            BindingPolicy::Rebind => {
                let endpoint = session.endpoint.clone();
                Rc::new(move || {
                    let (ops, endpoint) = (ops.clone(), endpoint.clone());
                    spawner(Box::pin(async move { ops.run(control, &endpoint).await }));
                })
            }
            BindingPolicy::Once => {
                let sessions = self.session.clone();
                Rc::new(move || match sessions.endpoint() {
                    Some(endpoint) => {
                        let ops = ops.clone();
                        spawner(Box::pin(async move { ops.run(control, &endpoint).await }));
                    }
                    None => ops.no_active_endpoint(control),
                })
            }
        }
    }
}
