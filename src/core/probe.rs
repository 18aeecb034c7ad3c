//! Liveness Prober - bounded GET against a candidate endpoint

use std::time::Duration;

use super::endpoint::Endpoint;
use super::paths::api;
use crate::client::{ClientError, Transport, TransportError};

/// Probe timeout unless configured otherwise
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Status 200 inside the window
    Reachable,
    /// Any other status, or the request failed outright
    Unreachable,
    /// Nothing came back inside the window
    TimedOut,
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool { matches!(self, ProbeOutcome::Reachable) }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Reachable => "reachable",
            ProbeOutcome::Unreachable => "unreachable",
            ProbeOutcome::TimedOut => "timed_out",
        }
    }

    /// Error equivalent of a failed probe
    pub fn error(&self) -> Option<ClientError> {
        match self {
            ProbeOutcome::Reachable => None,
            ProbeOutcome::Unreachable => Some(ClientError::EndpointUnreachable),
            ProbeOutcome::TimedOut => Some(ClientError::EndpointTimedOut),
        }
    }
}

pub async fn probe<T: Transport + ?Sized>(transport: &T, endpoint: &Endpoint, timeout: Duration) -> ProbeOutcome {
    let url = endpoint.url(api::PROBE);
    let outcome = match transport.get(&url, Some(timeout)).await {
        Ok(response) if response.is_success() => ProbeOutcome::Reachable,
        Ok(response) => {
            tracing::warn!(%url, status = response.status, "probe rejected");
            ProbeOutcome::Unreachable
        }
        Err(TransportError::TimedOut) => ProbeOutcome::TimedOut,
        Err(TransportError::Failed(reason)) => {
            tracing::warn!(%url, %reason, "probe failed");
            ProbeOutcome::Unreachable
        }
    };
    tracing::info!(%url, outcome = outcome.as_str(), "probe");
    outcome
}
