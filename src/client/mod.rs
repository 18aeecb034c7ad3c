//! Wallet Operations Client - typed calls against one endpoint
//!
//! # Routes
//!
//! | Call | Method | Route | Body | Reply |
//! |------|--------|-------|------|-------|
//! | [`WalletClient::derive`] | POST | `walletByPrivatekey` | form `privatekey` | `{public_key, blockchain_address}` |
//! | [`WalletClient::generate`] | POST | `wallet` | none | `{public_key, private_key, blockchain_address}` |
//! | [`WalletClient::balance`] | POST | `wallet/amount` | JSON `{blockchain_address}` | `{amount, message}` |
//! | [`WalletClient::transactions`] | POST | `ListTransaction` | JSON `{blockchain_address}` | `{data, message}` |
//! | [`WalletClient::submit`] | POST | `transaction` | JSON transfer | echoed request |
//!
//! No retries and no timeouts here; the only bounded call is the liveness probe.

pub mod types;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::endpoint::Endpoint;
use crate::core::paths::api;
pub use types::{
    AddressQuery, BalanceReply, DerivedKeys, HistoryReply, KeyMaterial, TransactionRecord, TransactionRequest,
};

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` pairs, encoded by the transport
    Form(Vec<(String, String)>),
    /// `application/json`
    Json(Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool { self.status == 200 }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    TimedOut,
    #[error("transport failed: {0}")]
    Failed(String),
}

/// HTTP seam. Browser futures are not `Send`, so neither is this.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError>;
    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError>;
}

/// Everything that can end a user action
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("endpoint unreachable")]
    EndpointUnreachable,
    #[error("endpoint timed out")]
    EndpointTimedOut,
    #[error("missing required input: {0}")]
    MissingRequiredInput(&'static str),
    #[error("invalid numeric input: {0}")]
    InvalidNumericInput(&'static str),
    #[error("server rejected request with status {status}: {body}")]
    ServerRejected { status: u16, body: String },
    #[error("transport failure: {0}")]
    TransportFailure(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("no active endpoint")]
    NoActiveEndpoint,
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::TimedOut => ClientError::EndpointTimedOut,
            TransportError::Failed(reason) => ClientError::TransportFailure(reason),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Borrowed view of a transport pinned to one endpoint
pub struct WalletClient<'a, T: Transport + ?Sized> {
    transport: &'a T,
    endpoint: &'a Endpoint,
}

impl<'a, T: Transport + ?Sized> WalletClient<'a, T> {
    pub fn new(transport: &'a T, endpoint: &'a Endpoint) -> Self {
        Self { transport, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint { self.endpoint }

    /// Public key and address for a supplied private key
    pub async fn derive(&self, private_key: &str) -> ClientResult<DerivedKeys> {
        let body = RequestBody::Form(vec![(api::PRIVATE_KEY_FORM_FIELD.to_string(), private_key.to_string())]);
        self.call(api::WALLET_BY_PRIVATE_KEY, body).await
    }

    /// Fresh random key material
    pub async fn generate(&self) -> ClientResult<KeyMaterial> {
        self.call(api::WALLET, RequestBody::Empty).await
    }

    pub async fn balance(&self, address: &str) -> ClientResult<BalanceReply> {
        let body = address_query(address)?;
        self.call(api::WALLET_AMOUNT, body).await
    }

    pub async fn transactions(&self, address: &str) -> ClientResult<HistoryReply> {
        let body = address_query(address)?;
        self.call(api::LIST_TRANSACTION, body).await
    }

    /// Send a transfer. Returns whatever the service echoed back.
    pub async fn submit(&self, request: &TransactionRequest) -> ClientResult<Value> {
        let body = serde_json::to_value(request).map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        self.call(api::TRANSACTION, RequestBody::Json(body)).await
    }

    async fn call<R: DeserializeOwned>(&self, route: &str, body: RequestBody) -> ClientResult<R> {
        let url = self.endpoint.url(route);
        tracing::debug!(%url, "POST");
        let response = self.transport.post(&url, body).await?;
        if !response.is_success() {
            tracing::warn!(%url, status = response.status, "request rejected");
            return Err(ClientError::ServerRejected { status: response.status, body: response.body });
        }
        serde_json::from_str(&response.body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

fn address_query(address: &str) -> ClientResult<RequestBody> {
    if address.is_empty() {
        return Err(ClientError::MissingRequiredInput("blockchain_address"));
    }
    Ok(RequestBody::Json(serde_json::json!({ "blockchain_address": address })))
}
