//! In-memory ledger for the dev node

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

use crate::client::{DerivedKeys, KeyMaterial, TransactionRecord, TransactionRequest};
use crate::core::display::parse_float_prefix;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("private key is empty")]
    EmptyKey,
    #[error("sender keys do not match sender address")]
    KeyMismatch,
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("insufficient funds: balance {balance}, value {value}")]
    InsufficientFunds { balance: f64, value: f64 },
}

/// Public key and address for a private key
pub fn derive_keys(private_key: &str) -> Result<DerivedKeys, LedgerError> {
    if private_key.trim().is_empty() {
        return Err(LedgerError::EmptyKey);
    }
    let (public_key, blockchain_address) = public_parts(private_key);
    Ok(DerivedKeys { public_key, blockchain_address })
}

pub fn generate_keys() -> KeyMaterial {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    let private_key = hex::encode(secret);
    let (public_key, blockchain_address) = public_parts(&private_key);
    KeyMaterial { private_key, public_key, blockchain_address }
}

fn public_parts(private_key: &str) -> (String, String) {
    let public_key = hex::encode(Sha256::digest(format!("pub:{}", private_key).as_bytes()));
    let address = hex::encode(Sha256::digest(public_key.as_bytes()))[..40].to_string();
    (public_key, address)
}

#[derive(Debug)]
pub struct Ledger {
    starting_balance: f64,
    balances: HashMap<String, f64>,
    history: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new(starting_balance: f64) -> Self {
        Self { starting_balance, balances: HashMap::new(), history: Vec::new() }
    }

    /// Unseen addresses read as the starting balance without being stored
    pub fn balance(&self, address: &str) -> f64 {
        self.balances.get(address).copied().unwrap_or(self.starting_balance)
    }

    /// Addresses with a stored balance (touched by a transfer)
    pub fn accounts(&self) -> usize {
        self.balances.len()
    }

    /// Check the sender's keys and funds, then move `value`
    pub fn transfer(&mut self, tx: &TransactionRequest) -> Result<TransactionRecord, LedgerError> {
        let keys = derive_keys(&tx.sender_private_key)?;
        if keys.blockchain_address != tx.sender_blockchain_address || keys.public_key != tx.sender_public_key {
            return Err(LedgerError::KeyMismatch);
        }
        let value = parse_float_prefix(&tx.value)
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| LedgerError::InvalidValue(tx.value.clone()))?;
        let balance = self.balance(&tx.sender_blockchain_address);
        if balance < value {
            return Err(LedgerError::InsufficientFunds { balance, value });
        }
        let recipient = self.balance(&tx.recipient_blockchain_address);
        self.balances.insert(tx.sender_blockchain_address.clone(), balance - value);
        self.balances.insert(tx.recipient_blockchain_address.clone(), recipient + value);

        let record = TransactionRecord {
            from: tx.sender_blockchain_address.clone(),
            to: tx.recipient_blockchain_address.clone(),
            value: serde_json::json!(value),
        };
        self.history.push(record.clone());
        Ok(record)
    }

    /// Transfers touching `address`, oldest first
    pub fn history_for(&self, address: &str) -> Vec<TransactionRecord> {
        self.history.iter().filter(|r| r.from == address || r.to == address).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_from(keys: &KeyMaterial, to: &str, value: &str) -> TransactionRequest {
        TransactionRequest {
            sender_private_key: keys.private_key.clone(),
            sender_blockchain_address: keys.blockchain_address.clone(),
            sender_public_key: keys.public_key.clone(),
            recipient_blockchain_address: to.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_keys("secret").unwrap();
        let b = derive_keys("secret").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.blockchain_address.len(), 40);
        assert_eq!(derive_keys("  "), Err(LedgerError::EmptyKey));
    }

    #[test]
    fn generated_keys_derive_back() {
        let keys = generate_keys();
        let derived = derive_keys(&keys.private_key).unwrap();
        assert_eq!(derived.public_key, keys.public_key);
        assert_eq!(derived.blockchain_address, keys.blockchain_address);
    }

    #[test]
    fn transfer_moves_funds_and_records_history() {
        let mut ledger = Ledger::new(100.0);
        let alice = generate_keys();
        ledger.transfer(&request_from(&alice, "bob", "30")).unwrap();
        assert_eq!(ledger.balance(&alice.blockchain_address), 70.0);
        assert_eq!(ledger.balance("bob"), 130.0);
        assert_eq!(ledger.history_for("bob").len(), 1);
        assert!(ledger.history_for("carol").is_empty());
    }

    #[test]
    fn balance_queries_do_not_store_accounts() {
        let mut ledger = Ledger::new(100.0);
        for i in 0..50 {
            assert_eq!(ledger.balance(&format!("addr-{}", i)), 100.0);
        }
        assert_eq!(ledger.accounts(), 0);

        let alice = generate_keys();
        ledger.transfer(&request_from(&alice, "bob", "5")).unwrap();
        assert_eq!(ledger.accounts(), 2);
    }

    #[test]
    fn transfer_rejections() {
        let mut ledger = Ledger::new(10.0);
        let alice = generate_keys();
        assert!(matches!(ledger.transfer(&request_from(&alice, "bob", "11")), Err(LedgerError::InsufficientFunds { .. })));
        assert!(matches!(ledger.transfer(&request_from(&alice, "bob", "x")), Err(LedgerError::InvalidValue(_))));
        let mut forged = request_from(&alice, "bob", "1");
        forged.sender_blockchain_address = "someone-else".into();
        assert_eq!(ledger.transfer(&forged), Err(LedgerError::KeyMismatch));
    }
}
