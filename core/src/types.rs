//! Response DTOs for the news API.
//!
//! # Design
//! `/top-headlines` and `/everything` return the same shape, modelled once as
//! `ArticlesResponse`. The endpoint-specific names are transparent newtypes
//! that convert into each other without copying. The mock-server crate keeps
//! its own definitions; integration tests catch schema drift.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Publisher reference embedded in an article. Not the same record as
/// `Source`, which only the `/sources` route returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// One news item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    /// Kept as sent; the service's timestamp format is not parsed.
    pub published_at: String,
    pub content: Option<String>,
}

/// One publisher from the `/sources` catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub language: String,
    pub country: String,
}

/// Successful payload of the article routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<Article>,
}

/// Successful payload of `/sources`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesResponse {
    pub status: String,
    pub sources: Vec<Source>,
}

macro_rules! articles_alias {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub ArticlesResponse);

        impl $name {
            pub fn into_inner(self) -> ArticlesResponse {
                self.0
            }
        }

        impl Deref for $name {
            type Target = ArticlesResponse;

            fn deref(&self) -> &ArticlesResponse {
                &self.0
            }
        }

        impl From<ArticlesResponse> for $name {
            fn from(inner: ArticlesResponse) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for ArticlesResponse {
            fn from(outer: $name) -> Self {
                outer.0
            }
        }
    };
}

articles_alias!(
    /// Result of `/top-headlines`.
    TopHeadlinesResponse
);

articles_alias!(
    /// Result of `/everything`.
    EverythingResponse
);

impl From<TopHeadlinesResponse> for EverythingResponse {
    fn from(r: TopHeadlinesResponse) -> Self {
        Self(r.0)
    }
}

impl From<EverythingResponse> for TopHeadlinesResponse {
    fn from(r: EverythingResponse) -> Self {
        Self(r.0)
    }
}
