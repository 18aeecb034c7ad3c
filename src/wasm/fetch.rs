//! FetchTransport - window.fetch, raced against setTimeout for bounded calls

use async_trait::async_trait;
use futures::future::{self, Either};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::client::{HttpResponse, RequestBody, Transport, TransportError};

#[derive(Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self { Self }

    async fn exchange(&self, method: &str, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        let init = RequestInit::new();
        init.set_method(method);
        init.set_mode(RequestMode::Cors);

        let content_type = match &body {
            RequestBody::Empty => None,
            RequestBody::Form(pairs) => {
                let encoded: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
                    .collect();
                init.set_body(&JsValue::from_str(&encoded.join("&")));
                Some("application/x-www-form-urlencoded")
            }
            RequestBody::Json(value) => {
                init.set_body(&JsValue::from_str(&value.to_string()));
                Some("application/json")
            }
        };

        let request = Request::new_with_str_and_init(url, &init).map_err(js_failure)?;
        if let Some(content_type) = content_type {
            request.headers().set("Content-Type", content_type).map_err(js_failure)?;
        }

        let window = super::window().map_err(js_failure)?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_failure)?
            .dyn_into()
            .map_err(js_failure)?;
        let status = response.status();
        let text = JsFuture::from(response.text().map_err(js_failure)?).await.map_err(js_failure)?;
        Ok(HttpResponse { status, body: text.as_string().unwrap_or_default() })
    }
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

fn js_failure(e: JsValue) -> TransportError {
    TransportError::Failed(format!("{:?}", e))
}

/// Resolves after `limit`
fn sleep(limit: Duration) -> JsFuture {
    let ms = limit.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    JsFuture::from(promise)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        let exchange = self.exchange("GET", url, RequestBody::Empty);
        match timeout {
            None => exchange.await,
            Some(limit) => match future::select(Box::pin(exchange), sleep(limit)).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => Err(TransportError::TimedOut),
            },
        }
    }

    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        self.exchange("POST", url, body).await
    }
}
