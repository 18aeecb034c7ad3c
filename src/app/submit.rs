//! Transaction Submission Workflow
//!
//! Collect → Confirm → Validate presence → Validate numeric → Submit → Report.
//! Linear, nothing kept between runs. A failed run is only retried by the
//! user clicking again, which repeats the whole sequence.
//!
//! Balance sufficiency is deliberately not checked: the service decides.

use serde_json::Value;

use super::{Field, Notice, Surface, CONFIRM_SEND_PROMPT};
use crate::client::{ClientError, Transport, TransactionRequest, WalletClient};
use crate::core::display::parse_float_prefix;
use crate::core::endpoint::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// User said no at the prompt
    Declined,
    /// Input validation stopped the run before any network call
    Invalid(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Aborted(AbortReason),
    /// Service accepted; carries the echoed body
    Succeeded(Value),
    Failed(ClientError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool { matches!(self, SubmitOutcome::Succeeded(_)) }
}

pub async fn run<S: Surface + ?Sized, T: Transport + ?Sized>(surface: &S, transport: &T, endpoint: &Endpoint) -> SubmitOutcome {
    let recipient = surface.field(Field::RecipientAddress);
    let amount = surface.field(Field::Amount);

    if !surface.confirm(CONFIRM_SEND_PROMPT) {
        surface.notify(&Notice::Cancelled);
        return SubmitOutcome::Aborted(AbortReason::Declined);
    }

    if let Err(e) = check_present(&recipient, &amount) {
        surface.notify(&Notice::IncompleteTransfer);
        return SubmitOutcome::Aborted(AbortReason::Invalid(e));
    }

    if let Err(e) = check_numeric(&surface.field(Field::Balance), &amount) {
        surface.notify(&Notice::InvalidAmount);
        return SubmitOutcome::Aborted(AbortReason::Invalid(e));
    }

    let request = TransactionRequest {
        sender_private_key: surface.field(Field::PrivateKey),
        sender_blockchain_address: surface.field(Field::Address),
        sender_public_key: surface.field(Field::PublicKey),
        recipient_blockchain_address: recipient,
        value: amount,
    };

    match WalletClient::new(transport, endpoint).submit(&request).await {
        Ok(echo) => {
            tracing::info!(recipient = %request.recipient_blockchain_address, value = %request.value, "transaction sent");
            surface.notify(&Notice::Sent);
            SubmitOutcome::Succeeded(echo)
        }
        Err(e) => {
            let detail = match &e {
                ClientError::ServerRejected { body, .. } if !body.is_empty() => body.clone(),
                other => other.to_string(),
            };
            tracing::warn!(error = %e, "transaction failed");
            surface.diagnostic(&detail);
            surface.notify(&Notice::SendFailed);
            SubmitOutcome::Failed(e)
        }
    }
}

fn check_present(recipient: &str, amount: &str) -> Result<(), ClientError> {
    if recipient.is_empty() {
        return Err(ClientError::MissingRequiredInput("recipient_blockchain_address"));
    }
    if amount.is_empty() {
        return Err(ClientError::MissingRequiredInput("value"));
    }
    Ok(())
}

fn check_numeric(balance: &str, amount: &str) -> Result<(), ClientError> {
    if parse_float_prefix(balance).is_none() {
        return Err(ClientError::InvalidNumericInput("balance"));
    }
    if parse_float_prefix(amount).is_none() {
        return Err(ClientError::InvalidNumericInput("value"));
    }
    Ok(())
}
