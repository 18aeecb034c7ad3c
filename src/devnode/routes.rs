//! HTTP routes for the dev node

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::{get, post}, Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::MutexGuard;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::ledger::{derive_keys, generate_keys, Ledger, LedgerError};
use super::DevState;
use crate::client::{AddressQuery, DerivedKeys, KeyMaterial, TransactionRequest};

type ApiError = (StatusCode, String);

#[derive(Deserialize)]
pub struct PrivateKeyForm {
    #[serde(default)]
    privatekey: String,
}

/// CORS is wide open so a page served from anywhere can talk to it
pub fn create_router(state: DevState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/walletByPrivatekey", post(wallet_by_private_key))
        .route("/wallet", post(new_wallet))
        .route("/wallet/amount", post(amount))
        .route("/transaction", post(transaction))
        .route("/ListTransaction", post(list_transactions))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn lock(s: &DevState) -> Result<MutexGuard<'_, Ledger>, ApiError> {
    s.ledger.lock().map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "ledger lock poisoned".to_string()))
}

fn bad_request(e: LedgerError) -> ApiError { (StatusCode::BAD_REQUEST, e.to_string()) }

fn require_address(q: &AddressQuery) -> Result<(), ApiError> {
    if q.blockchain_address.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "blockchain_address is required".to_string()));
    }
    Ok(())
}

async fn health(State(s): State<DevState>) -> impl IntoResponse {
    Json(json!({"status": "ok", "service": s.name}))
}

async fn wallet_by_private_key(Form(form): Form<PrivateKeyForm>) -> Result<Json<DerivedKeys>, ApiError> {
    derive_keys(&form.privatekey).map(Json).map_err(bad_request)
}

async fn new_wallet() -> Json<KeyMaterial> {
    let keys = generate_keys();
    tracing::debug!(address = %keys.blockchain_address, "generated wallet");
    Json(keys)
}

async fn amount(State(s): State<DevState>, Json(q): Json<AddressQuery>) -> Result<Json<Value>, ApiError> {
    require_address(&q)?;
    let amount = lock(&s)?.balance(&q.blockchain_address);
    Ok(Json(json!({"amount": amount, "message": "ok"})))
}

async fn transaction(State(s): State<DevState>, Json(tx): Json<TransactionRequest>) -> Result<Json<TransactionRequest>, ApiError> {
    let record = lock(&s)?.transfer(&tx).map_err(bad_request)?;
    tracing::info!(from = %record.from, to = %record.to, value = %record.value, "transfer");
    Ok(Json(tx))
}

async fn list_transactions(State(s): State<DevState>, Json(q): Json<AddressQuery>) -> Result<Json<Value>, ApiError> {
    require_address(&q)?;
    let data = lock(&s)?.history_for(&q.blockchain_address);
    Ok(Json(json!({"data": data, "message": "ok"})))
}
