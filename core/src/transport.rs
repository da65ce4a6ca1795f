//! The one place that performs network I/O.
//!
//! `NewsClient` hands a fully built `HttpRequest` to a `Transport` and gets
//! back the raw status and body. Hosts with their own HTTP stack implement
//! the trait; `UreqTransport` is the default.

use std::fmt;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single request. No retries, no caching.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a shared `ureq` agent.
///
/// 4xx/5xx responses are returned as data so the decoder can read the error
/// envelope the service sends with them.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let network = |e: ureq::Error| TransportError::Network {
            url: request.url.clone(),
            source: Box::new(e),
        };

        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(request.url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(network)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        // Invalid UTF-8 is replaced rather than rejected; the decoder then
        // reports a body it cannot parse as a `DecodeError`.
        let bytes = response.body_mut().read_to_vec().map_err(network)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
