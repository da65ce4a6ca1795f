//! Blocking client core for a hosted news-aggregation API.
//!
//! # Overview
//! Three read-only routes are covered: `/top-headlines`, `/everything` and
//! `/sources`. Every call runs the same pipeline: validate the options,
//! encode them into a query string, send a GET with the `X-Api-Key` header,
//! then classify the JSON envelope into a typed payload or an `ApiError`.
//!
//! # Design
//! - `NewsClient` holds only configuration and a `Transport`, so it is safe
//!   to share across threads.
//! - Each route is split into `build_*` (no I/O) and `parse_*` (no I/O), with
//!   `fetch_*` joining them through the transport. Hosts with their own HTTP
//!   stack can skip `Transport` entirely.
//! - Options types describe their own query fields through `QueryParams`, in
//!   declaration order, instead of inspecting values at runtime.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod options;
pub mod query;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::NewsClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, DecodeError, NewsApiError, TransportError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::{Endpoint, EverythingOptions, SourcesOptions, TopHeadlinesOptions};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Article, ArticleSource, ArticlesResponse, EverythingResponse, Source, SourcesResponse,
    TopHeadlinesResponse,
};
