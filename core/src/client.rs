//! Request builder, response parser and fetch facades for the news API.
//!
//! # Design
//! `NewsClient` holds only its configuration and a `Transport`; nothing is
//! mutated between calls, so one client can be shared across threads. Each
//! endpoint is split into `build_*` (validate, encode, attach the key) and
//! `parse_*` (classify and decode), with `fetch_*` running
//! build → transport → parse. Hosts doing their own I/O call the first two
//! directly.

use std::fmt;

use tracing::debug;

use crate::config::ClientConfig;
use crate::decode::decode;
use crate::error::{NewsApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, API_KEY_HEADER};
use crate::options::{Endpoint, EverythingOptions, SourcesOptions, TopHeadlinesOptions};
use crate::query::encode;
use crate::transport::{Transport, UreqTransport};
use crate::types::{EverythingResponse, SourcesResponse, TopHeadlinesResponse};

/// Client for the `/top-headlines`, `/everything` and `/sources` routes.
pub struct NewsClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl NewsClient<UreqTransport> {
    /// Client for the hosted service using the default transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// See `ClientConfig::from_env`.
    pub fn from_env() -> Result<Self, NewsApiError> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }
}

impl<T: Transport> NewsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate `options` and turn them into a request for `E::PATH`.
    pub fn build<E: Endpoint>(&self, options: &E) -> Result<HttpRequest, NewsApiError> {
        options.validate()?;
        if self.config.api_key().is_empty() {
            return Err(TransportError::MissingApiKey.into());
        }

        let url = encode(&format!("{}{}", self.config.base_url(), E::PATH), options);
        debug!(%url, "built request");
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![(API_KEY_HEADER.to_string(), self.config.api_key().to_string())],
            body: None,
        })
    }

    pub fn parse<E: Endpoint>(&self, response: HttpResponse) -> Result<E::Response, NewsApiError> {
        decode(&response)
    }

    /// Build, execute and parse in one call.
    pub fn fetch<E: Endpoint>(&self, options: &E) -> Result<E::Response, NewsApiError> {
        let request = self.build(options)?;
        let response = self.transport.execute(&request)?;
        self.parse::<E>(response)
    }

    pub fn build_top_headlines(&self, options: &TopHeadlinesOptions) -> Result<HttpRequest, NewsApiError> {
        self.build(options)
    }

    pub fn parse_top_headlines(&self, response: HttpResponse) -> Result<TopHeadlinesResponse, NewsApiError> {
        self.parse::<TopHeadlinesOptions>(response)
    }

    pub fn fetch_top_headlines(&self, options: &TopHeadlinesOptions) -> Result<TopHeadlinesResponse, NewsApiError> {
        let resp = self.fetch(options)?;
        debug!(total = resp.total_results, articles = resp.articles.len(), "top headlines");
        Ok(resp)
    }

    pub fn build_everything(&self, options: &EverythingOptions) -> Result<HttpRequest, NewsApiError> {
        self.build(options)
    }

    pub fn parse_everything(&self, response: HttpResponse) -> Result<EverythingResponse, NewsApiError> {
        self.parse::<EverythingOptions>(response)
    }

    pub fn fetch_everything(&self, options: &EverythingOptions) -> Result<EverythingResponse, NewsApiError> {
        let resp = self.fetch(options)?;
        debug!(total = resp.total_results, articles = resp.articles.len(), "everything");
        Ok(resp)
    }

    pub fn build_sources(&self, options: &SourcesOptions) -> Result<HttpRequest, NewsApiError> {
        self.build(options)
    }

    pub fn parse_sources(&self, response: HttpResponse) -> Result<SourcesResponse, NewsApiError> {
        self.parse::<SourcesOptions>(response)
    }

    pub fn fetch_sources(&self, options: &SourcesOptions) -> Result<SourcesResponse, NewsApiError> {
        let resp = self.fetch(options)?;
        debug!(sources = resp.sources.len(), "sources");
        Ok(resp)
    }
}

impl<T: Transport + fmt::Debug> fmt::Debug for NewsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish()
    }
}
