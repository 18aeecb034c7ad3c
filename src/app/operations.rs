//! Operations - one network call per click, results written to the surface

use std::rc::Rc;

use super::submit::{self, SubmitOutcome};
use super::{Field, Notice, Surface};
use crate::client::{BalanceReply, ClientError, ClientResult, DerivedKeys, HistoryReply, KeyMaterial, Transport, WalletClient};
use crate::core::binding::Control;
use crate::core::display::display_value;
use crate::core::endpoint::Endpoint;
use crate::core::history;

/// Handler bodies. Cheap to clone; every clone shares the surface and transport.
pub struct Operations<S, T> {
    surface: Rc<S>,
    transport: Rc<T>,
}

impl<S, T> Clone for Operations<S, T> {
    fn clone(&self) -> Self {
        Self { surface: self.surface.clone(), transport: self.transport.clone() }
    }
}

impl<S: Surface, T: Transport> Operations<S, T> {
    pub fn new(surface: Rc<S>, transport: Rc<T>) -> Self { Self { surface, transport } }

    pub fn surface(&self) -> &Rc<S> { &self.surface }
    pub fn transport(&self) -> &Rc<T> { &self.transport }

    /// Run the handler body behind `control`
    pub async fn run(&self, control: Control, endpoint: &Endpoint) {
        match control {
            Control::LoadPrivateKey => {
                let _ = self.load_private_key(endpoint).await;
            }
            Control::LoadRandom => {
                let _ = self.load_random(endpoint).await;
            }
            Control::GetBalance => {
                let _ = self.get_balance(endpoint).await;
            }
            Control::ListTransactions => {
                let _ = self.list_transactions(endpoint).await;
            }
            Control::Submit => {
                let _ = self.submit_transaction(endpoint).await;
            }
        }
    }

    /// Derive public key and address from the private key field
    pub async fn load_private_key(&self, endpoint: &Endpoint) -> ClientResult<DerivedKeys> {
        let private_key = self.surface.field(Field::PrivateKey);
        tracing::debug!(endpoint = %endpoint.id, "loading keys from private key");
        let keys = WalletClient::new(&*self.transport, endpoint)
            .derive(&private_key)
            .await
            .map_err(|e| self.report(Control::LoadPrivateKey, e))?;
        self.surface.set_field(Field::PublicKey, &keys.public_key);
        self.surface.set_field(Field::Address, &keys.blockchain_address);
        Ok(keys)
    }

    /// Generate a fresh wallet and fill all three key fields
    pub async fn load_random(&self, endpoint: &Endpoint) -> ClientResult<KeyMaterial> {
        tracing::debug!(endpoint = %endpoint.id, "generating wallet");
        let keys = WalletClient::new(&*self.transport, endpoint)
            .generate()
            .await
            .map_err(|e| self.report(Control::LoadRandom, e))?;
        self.surface.set_field(Field::PublicKey, &keys.public_key);
        self.surface.set_field(Field::PrivateKey, &keys.private_key);
        self.surface.set_field(Field::Address, &keys.blockchain_address);
        Ok(keys)
    }

    pub async fn get_balance(&self, endpoint: &Endpoint) -> ClientResult<BalanceReply> {
        let address = self.surface.field(Field::Address);
        let reply = WalletClient::new(&*self.transport, endpoint)
            .balance(&address)
            .await
            .map_err(|e| self.report(Control::GetBalance, e))?;
        self.surface.set_field(Field::Balance, &display_value(&reply.amount));
        self.surface.notify(&Notice::BalanceLoaded(reply.message.clone()));
        Ok(reply)
    }

    pub async fn list_transactions(&self, endpoint: &Endpoint) -> ClientResult<HistoryReply> {
        let address = self.surface.field(Field::Address);
        let reply = WalletClient::new(&*self.transport, endpoint)
            .transactions(&address)
            .await
            .map_err(|e| self.report(Control::ListTransactions, e))?;
        self.surface.render_history(&history::render(Some(&reply.data)));
        self.surface.notify(&Notice::HistoryLoaded(reply.message.clone()));
        Ok(reply)
    }

    pub async fn submit_transaction(&self, endpoint: &Endpoint) -> SubmitOutcome {
        submit::run(&*self.surface, &*self.transport, endpoint).await
    }

    /// A once-bound control fired with no active session
    pub fn no_active_endpoint(&self, control: Control) {
        self.report(control, ClientError::NoActiveEndpoint);
    }

    fn report(&self, control: Control, error: ClientError) -> ClientError {
        match error {
            ClientError::MissingRequiredInput(_) => self.surface.notify(&Notice::AddressRequired),
            ClientError::NoActiveEndpoint => self.surface.notify(&Notice::NoActiveEndpoint),
            _ => {}
        }
        tracing::warn!(control = control.as_str(), %error, "operation failed");
        self.surface.diagnostic(&format!("{}: {}", control.as_str(), error));
        error
    }
}
