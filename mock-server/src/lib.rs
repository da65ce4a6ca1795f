//! In-process stand-in for the hosted news API.
//!
//! Serves `/v2/top-headlines`, `/v2/everything` and `/v2/sources` from a
//! fixed catalog, checks the `X-Api-Key` header, and answers failures with
//! the same `{"status":"error","code":..,"message":..}` envelope the real
//! service uses. Query parameters are read under their lowercased names.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

pub const DEFAULT_API_KEY: &str = "test-key";

/// Any request carrying this key is answered with `rateLimited`.
pub const RATE_LIMITED_KEY: &str = "rate-limited";

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;
const MAX_SOURCES: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub language: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesBody {
    pub status: String,
    pub total_results: usize,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourcesBody {
    pub status: String,
    pub sources: Vec<Source>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub code: String,
    pub message: String,
}

/// An error envelope plus the status it is sent with.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error".to_string(),
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

struct Catalog {
    api_key: String,
    articles: Vec<Article>,
    sources: Vec<Source>,
}

impl Catalog {
    fn source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    fn source_of(&self, article: &Article) -> Option<&Source> {
        article.source.id.as_deref().and_then(|id| self.source(id))
    }
}

type Shared = Arc<Catalog>;
type Params = HashMap<String, String>;

/// Router using `DEFAULT_API_KEY`.
pub fn app() -> Router {
    router(DEFAULT_API_KEY)
}

pub fn router(api_key: &str) -> Router {
    let catalog = Catalog {
        api_key: api_key.to_string(),
        articles: fixture_articles(),
        sources: fixture_sources(),
    };
    Router::new()
        .route("/v2/top-headlines", get(top_headlines))
        .route("/v2/everything", get(everything))
        .route("/v2/sources", get(sources))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, DEFAULT_API_KEY).await
}

pub async fn serve(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock news api listening");
    }
    axum::serve(listener, router(api_key)).await
}

fn authorize(catalog: &Catalog, headers: &HeaderMap) -> Result<(), ApiFailure> {
    let key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if key.is_empty() {
        return Err(ApiFailure::new(
            StatusCode::UNAUTHORIZED,
            "apiKeyMissing",
            "Your API key is missing.",
        ));
    }
    if key == RATE_LIMITED_KEY {
        return Err(ApiFailure::new(
            StatusCode::TOO_MANY_REQUESTS,
            "rateLimited",
            "You have made too many requests recently.",
        ));
    }
    if key != catalog.api_key {
        return Err(ApiFailure::new(
            StatusCode::UNAUTHORIZED,
            "apiKeyInvalid",
            "Your API key is invalid or incorrect.",
        ));
    }
    Ok(())
}

fn param<'a>(params: &'a Params, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

/// Comma-separated list; empty items (the trailing comma) are ignored.
fn list(params: &Params, key: &str) -> Vec<String> {
    param(params, key)
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn number(params: &Params, key: &str, default: usize) -> Result<usize, ApiFailure> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            ApiFailure::new(
                StatusCode::BAD_REQUEST,
                "parameterInvalid",
                format!("{key} must be a number"),
            )
        }),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn check_sources_exist(catalog: &Catalog, ids: &[String]) -> Result<(), ApiFailure> {
    match ids.iter().find(|id| catalog.source(id).is_none()) {
        Some(id) => Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "sourceDoesNotExist",
            format!("The news source {id} does not exist."),
        )),
        None => Ok(()),
    }
}

fn paginate(params: &Params, matched: Vec<&Article>) -> Result<ArticlesBody, ApiFailure> {
    let page_size = number(params, "pagesize", DEFAULT_PAGE_SIZE)?;
    let page = number(params, "page", 1)?.max(1);
    if page_size > MAX_PAGE_SIZE {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "parameterInvalid",
            format!("pageSize must be at most {MAX_PAGE_SIZE}"),
        ));
    }
    let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
        ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "parameterInvalid",
            format!("page {page} is out of range"),
        )
    })?;
    let total_results = matched.len();
    let articles = matched
        .into_iter()
        .skip(offset)
        .take(page_size)
        .cloned()
        .collect();
    Ok(ArticlesBody {
        status: "ok".to_string(),
        total_results,
        articles,
    })
}

async fn top_headlines(
    State(catalog): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Result<Json<ArticlesBody>, ApiFailure> {
    authorize(&catalog, &headers)?;

    let q = param(&params, "q");
    let category = param(&params, "category");
    let country = param(&params, "country");
    let source_ids = list(&params, "sources");

    if q.is_empty() && category.is_empty() && country.is_empty() && source_ids.is_empty() {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "parametersMissing",
            "Required parameters are missing. Please set any of the following parameters and try again: sources, q, country, category.",
        ));
    }
    if !source_ids.is_empty() && (!category.is_empty() || !country.is_empty()) {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "parameterInvalid",
            "You cannot mix the sources parameter with the country or category parameters.",
        ));
    }
    check_sources_exist(&catalog, &source_ids)?;

    let matched = catalog
        .articles
        .iter()
        .filter(|a| q.is_empty() || contains_ci(&a.title, q))
        .filter(|a| {
            let src = catalog.source_of(a);
            (category.is_empty() || src.is_some_and(|s| s.category == category))
                && (country.is_empty() || src.is_some_and(|s| s.country == country))
        })
        .filter(|a| {
            source_ids.is_empty() || a.source.id.as_ref().is_some_and(|id| source_ids.contains(id))
        })
        .collect();

    paginate(&params, matched).map(Json)
}

async fn everything(
    State(catalog): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Result<Json<ArticlesBody>, ApiFailure> {
    authorize(&catalog, &headers)?;

    let q = param(&params, "q");
    let q_in_title = param(&params, "qintitle");
    let language = param(&params, "language");
    let source_ids = list(&params, "sources");
    let domains = list(&params, "domains");
    let excluded = list(&params, "excludedomains");

    if q.is_empty() && q_in_title.is_empty() && source_ids.is_empty() && domains.is_empty() {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "parametersMissing",
            "Required parameters are missing, the scope of your search is too broad. Please set any of the following required parameters and try again: q, qInTitle, sources, domains.",
        ));
    }
    if source_ids.len() > MAX_SOURCES {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "sourcesTooMany",
            format!("You have requested too many sources in a single request. The maximum is {MAX_SOURCES}."),
        ));
    }
    check_sources_exist(&catalog, &source_ids)?;

    let matched = catalog
        .articles
        .iter()
        .filter(|a| {
            q.is_empty()
                || contains_ci(&a.title, q)
                || a.description.as_deref().is_some_and(|d| contains_ci(d, q))
        })
        .filter(|a| q_in_title.is_empty() || contains_ci(&a.title, q_in_title))
        .filter(|a| language.is_empty() || catalog.source_of(a).is_some_and(|s| s.language == language))
        .filter(|a| {
            source_ids.is_empty() || a.source.id.as_ref().is_some_and(|id| source_ids.contains(id))
        })
        .filter(|a| domains.is_empty() || domains.iter().any(|d| a.url.contains(d.as_str())))
        .filter(|a| !excluded.iter().any(|d| a.url.contains(d.as_str())))
        .collect();

    paginate(&params, matched).map(Json)
}

async fn sources(
    State(catalog): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Result<Json<SourcesBody>, ApiFailure> {
    authorize(&catalog, &headers)?;

    let category = param(&params, "category");
    let country = param(&params, "country");
    let language = param(&params, "language");

    let sources = catalog
        .sources
        .iter()
        .filter(|s| category.is_empty() || s.category == category)
        .filter(|s| country.is_empty() || s.country == country)
        .filter(|s| language.is_empty() || s.language == language)
        .cloned()
        .collect();

    Ok(Json(SourcesBody {
        status: "ok".to_string(),
        sources,
    }))
}

fn source(id: &str, name: &str, url: &str, category: &str, language: &str, country: &str) -> Source {
    Source {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Latest news from {name}."),
        url: url.to_string(),
        category: category.to_string(),
        language: language.to_string(),
        country: country.to_string(),
    }
}

pub fn fixture_sources() -> Vec<Source> {
    vec![
        source("bbc-news", "BBC News", "https://www.bbc.co.uk/news", "general", "en", "gb"),
        source("reuters", "Reuters", "https://www.reuters.com", "business", "en", "us"),
        source("spiegel-online", "Spiegel Online", "https://www.spiegel.de", "general", "de", "de"),
        source("the-verge", "The Verge", "https://www.theverge.com", "technology", "en", "us"),
    ]
}

pub fn fixture_articles() -> Vec<Article> {
    let article = |id: &str, name: &str, author: Option<&str>, title: &str, url: &str, at: &str| Article {
        source: ArticleSource {
            id: Some(id.to_string()),
            name: name.to_string(),
        },
        author: author.map(str::to_string),
        title: title.to_string(),
        description: Some(format!("{title} - full story.")),
        url: url.to_string(),
        url_to_image: None,
        published_at: at.to_string(),
        content: Some(format!("{title} [+1200 chars]")),
    };
    vec![
        article(
            "bbc-news",
            "BBC News",
            Some("BBC News"),
            "Rust adoption grows across UK councils",
            "https://www.bbc.co.uk/news/technology-1",
            "2024-03-01T08:00:00Z",
        ),
        article(
            "the-verge",
            "The Verge",
            Some("Jane Doe"),
            "A new Rust compiler release lands",
            "https://www.theverge.com/2024/3/1/rust-release",
            "2024-03-01T12:30:00Z",
        ),
        article(
            "reuters",
            "Reuters",
            None,
            "Markets rally on strong earnings",
            "https://www.reuters.com/markets/rally",
            "2024-03-02T09:15:00Z",
        ),
        article(
            "spiegel-online",
            "Spiegel Online",
            None,
            "Klimagipfel in Berlin beginnt",
            "https://www.spiegel.de/wissenschaft/klimagipfel",
            "2024-03-02T10:00:00Z",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn list_ignores_trailing_comma() {
        let p = params(&[("sources", "bbc-news,reuters,")]);
        assert_eq!(list(&p, "sources"), vec!["bbc-news", "reuters"]);
        assert!(list(&p, "domains").is_empty());
    }

    #[test]
    fn error_body_serializes_envelope() {
        let body = ErrorBody {
            status: "error".to_string(),
            code: "rateLimited".to_string(),
            message: "slow down".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "rateLimited");
    }

    #[test]
    fn article_serializes_camel_case() {
        let json = serde_json::to_value(&fixture_articles()[0]).unwrap();
        assert!(json.get("publishedAt").is_some());
        assert!(json.get("urlToImage").is_some());
        assert!(json["urlToImage"].is_null());
    }

    #[test]
    fn every_article_source_is_in_the_catalog() {
        let sources = fixture_sources();
        for a in fixture_articles() {
            let id = a.source.id.unwrap();
            assert!(sources.iter().any(|s| s.id == id), "{id}");
        }
    }

    #[test]
    fn paginate_splits_pages() {
        let articles = fixture_articles();
        let matched: Vec<&Article> = articles.iter().collect();
        let body = paginate(&params(&[("pagesize", "3"), ("page", "2")]), matched).unwrap();
        assert_eq!(body.total_results, 4);
        assert_eq!(body.articles.len(), 1);
    }

    #[test]
    fn paginate_rejects_unrepresentable_offset() {
        let page = usize::MAX.to_string();
        let err = paginate(&params(&[("page", page.as_str())]), Vec::new()).unwrap_err();
        assert_eq!(err.code, "parameterInvalid");
    }

    #[test]
    fn paginate_rejects_oversized_pages() {
        let err = paginate(&params(&[("pagesize", "101")]), Vec::new()).unwrap_err();
        assert_eq!(err.code, "parameterInvalid");
    }
}
