//! HTTP transport seam.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Native builds: `OfflineTransport` fails every call, since the storefront
//! API is only reachable from the browser bundle.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use crate::error::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Outgoing request, relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), headers: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }

    /// Absolute URL with percent-encoded query string.
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }
}

/// Raw response: HTTP status plus the decoded JSON body (`Null` when empty).
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. Implementations own timeouts; they do not interpret
/// statuses or envelopes.
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request cannot be delivered, times
    /// out, or the body cannot be decoded.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport for native builds where no browser fetch is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

#[async_trait::async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network(format!(
            "{} {} not available outside the browser",
            request.method.as_str(),
            request.path
        )))
    }
}

#[cfg(any(test, feature = "csr"))]
pub(crate) fn decode_body(text: &str) -> Result<serde_json::Value, TransportError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(feature = "csr")]
pub use browser::GlooTransport;

#[cfg(feature = "csr")]
mod browser {
    use std::time::Duration;

    use futures::future::{Either, select};
    use gloo_net::http::{Request, RequestBuilder};

    use super::{HttpRequest, HttpResponse, Method, Transport, decode_body};
    use crate::error::TransportError;

    /// `fetch`-backed transport with a fixed per-request timeout.
    #[derive(Clone, Debug)]
    pub struct GlooTransport {
        base_url: String,
        timeout: Duration,
    }

    impl GlooTransport {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
            Self { base_url: base_url.into(), timeout }
        }

        fn builder(&self, request: &HttpRequest) -> RequestBuilder {
            let url = request.url(&self.base_url);
            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            builder
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for GlooTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let builder = self.builder(&request);
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Network(e.to_string()))?;

            let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
            let timer = gloo_timers::future::TimeoutFuture::new(millis);
            match select(Box::pin(prepared.send()), Box::pin(timer)).await {
                Either::Left((result, _)) => {
                    let response = result.map_err(|e| TransportError::Network(e.to_string()))?;
                    let status = response.status();
                    let text = response.text().await.map_err(|e| TransportError::Decode(e.to_string()))?;
                    // Error pages are often HTML; keep the status and drop the body.
                    let body = if (200..300).contains(&status) {
                        decode_body(&text)?
                    } else {
                        decode_body(&text).unwrap_or(serde_json::Value::Null)
                    };
                    Ok(HttpResponse { status, body })
                }
                Either::Right(((), _)) => Err(TransportError::Timeout(self.timeout)),
            }
        }
    }
}
