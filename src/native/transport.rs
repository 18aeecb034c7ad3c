//! HttpTransport - reqwest over tokio

use async_trait::async_trait;
use std::time::Duration;

use crate::client::{HttpResponse, RequestBody, Transport, TransportError};

#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self { Self::default() }

    pub fn with_client(client: reqwest::Client) -> Self { Self { client } }

    async fn send(&self, request: reqwest::RequestBuilder, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        let exchange = async {
            let response = request.send().await.map_err(map_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(map_error)?;
            Ok::<_, TransportError>(HttpResponse { status, body })
        };
        match timeout {
            Some(limit) => tokio::time::timeout(limit, exchange).await.map_err(|_| TransportError::TimedOut)?,
            None => exchange.await,
        }
    }
}

fn map_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() { TransportError::TimedOut } else { TransportError::Failed(e.to_string()) }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        self.send(self.client.get(url), timeout).await
    }

    async fn post(&self, url: &str, body: RequestBody) -> Result<HttpResponse, TransportError> {
        let request = self.client.post(url);
        let request = match &body {
            RequestBody::Empty => request,
            RequestBody::Form(pairs) => request.form(pairs),
            RequestBody::Json(value) => request.json(value),
        };
        self.send(request, None).await
    }
}
