//! Response classification and decoding.
//!
//! The body is parsed once into a JSON value; the `status` tag then decides
//! whether it is an error envelope or a payload for the endpoint.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, DecodeError, NewsApiError};
use crate::http::HttpResponse;

#[derive(Deserialize)]
struct ErrorEnvelope {
    code: String,
    #[serde(default)]
    message: String,
}

/// Classify `response` and decode its payload as `T`.
///
/// An error envelope wins regardless of HTTP status. Without one, a non-2xx
/// status yields `NewsApiError::Http` and a 2xx body that does not fit `T`
/// yields `NewsApiError::Decode`.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, NewsApiError> {
    let value: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(_) if !response.is_success() => return Err(http_error(response)),
        Err(e) => return Err(DecodeError::from(e).into()),
    };

    let status = value.get("status").and_then(Value::as_str).map(str::to_string);
    match status.as_deref() {
        Some("error") => {
            let envelope: ErrorEnvelope = serde_json::from_value(value).map_err(DecodeError::from)?;
            let err = ApiError::new(&envelope.code, envelope.message);
            debug!(status = response.status, code = err.kind.as_code(), "api returned an error envelope");
            Err(err.into())
        }
        _ if !response.is_success() => Err(http_error(response)),
        Some("ok") => Ok(serde_json::from_value(value).map_err(DecodeError::from)?),
        other => Err(DecodeError::UnexpectedStatus(other.map(str::to_string)).into()),
    }
}

fn http_error(response: &HttpResponse) -> NewsApiError {
    NewsApiError::Http {
        status: response.status,
        body: response.body.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::types::{EverythingResponse, SourcesResponse, TopHeadlinesResponse};

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const RATE_LIMITED: &str = r#"{"status":"error","code":"rateLimited","message":"Slow down"}"#;

    #[test]
    fn rate_limited_on_every_endpoint() {
        let resp = response(429, RATE_LIMITED);
        for err in [
            decode::<TopHeadlinesResponse>(&resp).unwrap_err(),
            decode::<EverythingResponse>(&resp).unwrap_err(),
            decode::<SourcesResponse>(&resp).unwrap_err(),
        ] {
            match err {
                NewsApiError::Api(api) => {
                    assert_eq!(api.kind, ApiErrorKind::RateLimited);
                    assert_eq!(api.message, "Slow down");
                }
                other => panic!("expected Api error, got {other:?}"),
            }
        }
    }

    #[test]
    fn error_envelope_with_success_status_is_still_an_error() {
        let err = decode::<SourcesResponse>(&response(200, RATE_LIMITED)).unwrap_err();
        assert!(matches!(err, NewsApiError::Api(ref api) if api.is_rate_limited()));
    }

    #[test]
    fn unknown_code_is_preserved() {
        let body = r#"{"status":"error","code":"brandNew","message":"?"}"#;
        let err = decode::<SourcesResponse>(&response(400, body)).unwrap_err();
        match err {
            NewsApiError::Api(api) => {
                assert_eq!(api.kind, ApiErrorKind::Unknown("brandNew".to_string()));
                assert_eq!(api.message, "?");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn error_envelope_without_message() {
        let body = r#"{"status":"error","code":"apiKeyMissing"}"#;
        let err = decode::<SourcesResponse>(&response(401, body)).unwrap_err();
        assert!(matches!(err, NewsApiError::Api(ref api) if api.kind == ApiErrorKind::ApiKeyMissing && api.message.is_empty()));
    }

    #[test]
    fn error_envelope_without_code_is_a_decode_error() {
        let err = decode::<SourcesResponse>(&response(400, r#"{"status":"error"}"#)).unwrap_err();
        assert!(matches!(err, NewsApiError::Decode(DecodeError::Json(_))));

        let body = r#"{"status":"error","code":42,"message":"x"}"#;
        let err = decode::<SourcesResponse>(&response(400, body)).unwrap_err();
        assert!(matches!(err, NewsApiError::Decode(DecodeError::Json(_))));
    }

    #[test]
    fn sources_payload() {
        let body = r#"{"status":"ok","sources":[{"id":"bbc-news","name":"BBC News",
            "description":"d","url":"https://bbc.co.uk","category":"general",
            "language":"en","country":"gb"}]}"#;
        let resp: SourcesResponse = decode(&response(200, body)).unwrap();
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.sources.len(), 1);
        assert_eq!(resp.sources[0].id, "bbc-news");
        assert_eq!(resp.sources[0].country, "gb");
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let body = r#"{"status":"ok","articles":[]}"#;
        let err = decode::<TopHeadlinesResponse>(&response(200, body)).unwrap_err();
        assert!(matches!(err, NewsApiError::Decode(DecodeError::Json(_))));
    }

    #[test]
    fn garbage_body() {
        let err = decode::<TopHeadlinesResponse>(&response(200, "not json")).unwrap_err();
        assert!(matches!(err, NewsApiError::Decode(_)));

        let err = decode::<TopHeadlinesResponse>(&response(502, "Bad Gateway")).unwrap_err();
        assert!(matches!(err, NewsApiError::Http { status: 502, .. }));
    }

    #[test]
    fn unexpected_status_tag() {
        let err = decode::<SourcesResponse>(&response(200, r#"{"status":"maybe"}"#)).unwrap_err();
        assert!(matches!(
            err,
            NewsApiError::Decode(DecodeError::UnexpectedStatus(Some(ref s))) if s == "maybe"
        ));

        let err = decode::<SourcesResponse>(&response(200, r#"{"sources":[]}"#)).unwrap_err();
        assert!(matches!(err, NewsApiError::Decode(DecodeError::UnexpectedStatus(None))));
    }
}
