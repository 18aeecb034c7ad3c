//! Wire types for the wallet service contract

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply to `POST walletByPrivatekey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKeys {
    pub public_key: String,
    pub blockchain_address: String,
}

/// Full key material, as returned by `POST wallet`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMaterial {
    pub private_key: String,
    pub public_key: String,
    pub blockchain_address: String,
}

/// Body of the balance and history queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub blockchain_address: String,
}

/// Reply to `POST wallet/amount`. The amount may be a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReply {
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub message: String,
}

/// Reply to `POST ListTransaction`. `data` is kept raw; the renderer decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReply {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
}

/// One history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub from: String,
    pub to: String,
    pub value: Value,
}

/// Body of `POST transaction`. Built fresh from the fields on each submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub sender_private_key: String,
    pub sender_blockchain_address: String,
    pub sender_public_key: String,
    pub recipient_blockchain_address: String,
    pub value: String,
}
