//! Path and element-id constants
//!
//! Centralized registry for the wallet service routes and the browser page
//! element ids the front ends bind to.

/// Wallet service routes, relative to the active endpoint's base URL
pub mod api {
    pub const PROBE: &str = "";
    pub const WALLET_BY_PRIVATE_KEY: &str = "walletByPrivatekey";
    pub const WALLET: &str = "wallet";
    pub const WALLET_AMOUNT: &str = "wallet/amount";
    pub const TRANSACTION: &str = "transaction";
    pub const LIST_TRANSACTION: &str = "ListTransaction";

    /// Form field carrying the private key on the derive call
    pub const PRIVATE_KEY_FORM_FIELD: &str = "privatekey";
}

/// Page element ids (browser front end)
pub mod dom {
    pub const ENDPOINT_SELECT: &str = "mySelect";

    pub const LOAD_PRIVATE_KEY: &str = "load_privateKey";
    pub const LOAD_RANDOM: &str = "loadRandom";
    pub const GET_BALANCE: &str = "getBalance";
    pub const LIST_TRANSACTIONS: &str = "transactionButton";
    pub const SUBMIT: &str = "buttonSubmit";

    pub const PRIVATE_KEY: &str = "inputPrivateKey";
    pub const PUBLIC_KEY: &str = "inputPublic";
    pub const ADDRESS: &str = "inputAddress";
    pub const BALANCE: &str = "Balance";
    pub const RECIPIENT_ADDRESS: &str = "inputReceiveAddress";
    pub const AMOUNT: &str = "inputAmount";

    pub const HISTORY_CONTAINER: &str = "transactionContainer";
}

/// CSS classes used by the history view
pub mod class {
    pub const TRANSACTION_BOX: &str = "transaction-box";
    pub const TRANSACTION_ROW: &str = "transaction-row";
    pub const LABEL: &str = "label";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const VALUE: &str = "value";
}
