//! Per-endpoint options records.
//!
//! Every field is optional at the type level; an empty string, zero counter,
//! empty list or absent timestamp means "unset" and is never sent. Which
//! combinations are acceptable is decided by `Endpoint::validate`.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::query::{QueryBuilder, QueryParams};
use crate::types::{EverythingResponse, SourcesResponse, TopHeadlinesResponse};
use crate::validate;

/// Binds an options type to its route, its rules and its response shape.
pub trait Endpoint: QueryParams {
    /// Route below the client's base URL, with a leading slash.
    const PATH: &'static str;

    type Response: DeserializeOwned;

    fn validate(&self) -> Result<(), ValidationError>;
}

/// Options for `/top-headlines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopHeadlinesOptions {
    pub page_size: u32,
    pub page: u32,
    pub q: String,
    pub category: String,
    pub country: String,
    pub sources: Vec<String>,
}

impl QueryParams for TopHeadlinesOptions {
    fn write_params(&self, query: &mut QueryBuilder) {
        query
            .count("pagesize", self.page_size)
            .count("page", self.page)
            .text("q", &self.q)
            .text("category", &self.category)
            .text("country", &self.country)
            .list("sources", &self.sources);
    }
}

impl Endpoint for TopHeadlinesOptions {
    const PATH: &'static str = "/top-headlines";
    type Response = TopHeadlinesResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_top_headlines(self)
    }
}

/// Options for `/everything`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EverythingOptions {
    pub page_size: u32,
    pub page: u32,
    pub q: String,
    pub q_in_title: String,
    pub language: String,
    pub sort_by: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub sources: Vec<String>,
    pub domains: Vec<String>,
    pub exclude_domains: Vec<String>,
}

impl QueryParams for EverythingOptions {
    fn write_params(&self, query: &mut QueryBuilder) {
        query
            .count("pagesize", self.page_size)
            .count("page", self.page)
            .text("q", &self.q)
            .text("qintitle", &self.q_in_title)
            .text("language", &self.language)
            .text("sortby", &self.sort_by)
            .timestamp("from", self.from.as_ref())
            .timestamp("to", self.to.as_ref())
            .list("sources", &self.sources)
            .list("domains", &self.domains)
            .list("excludedomains", &self.exclude_domains);
    }
}

impl Endpoint for EverythingOptions {
    const PATH: &'static str = "/everything";
    type Response = EverythingResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_everything(self)
    }
}

/// Options for `/sources`. All fields may be left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourcesOptions {
    pub category: String,
    pub country: String,
    pub language: String,
}

impl QueryParams for SourcesOptions {
    fn write_params(&self, query: &mut QueryBuilder) {
        query
            .text("category", &self.category)
            .text("country", &self.country)
            .text("language", &self.language);
    }
}

impl Endpoint for SourcesOptions {
    const PATH: &'static str = "/sources";
    type Response = SourcesResponse;

    fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_sources(self)
    }
}
