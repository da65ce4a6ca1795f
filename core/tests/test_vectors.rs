//! Verify build/parse against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes options inputs, the expected request URL, a
//! simulated response and the expected outcome: a decoded payload, an API
//! error code, or the validation rule that rejects the input before any
//! request is built.

use std::fmt::Debug;

use newsapi_core::{
    ClientConfig, Endpoint, EverythingOptions, HttpMethod, HttpResponse, NewsApiError, NewsClient,
    SourcesOptions, TopHeadlinesOptions,
};
use serde::de::DeserializeOwned;

const BASE_URL: &str = "http://localhost:3000/v2";
const API_KEY: &str = "vector-key";

fn client() -> NewsClient {
    NewsClient::from_config(ClientConfig::new(API_KEY).with_base_url(BASE_URL))
}

/// Variant name of a `Debug`-printed enum value, e.g. `TooManySources`.
fn variant_name(value: &impl Debug) -> String {
    let rendered = format!("{value:?}");
    rendered
        .split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap()
        .to_string()
}

fn run_vectors<E>(raw: &str)
where
    E: Endpoint + DeserializeOwned,
    E::Response: PartialEq + Debug,
{
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let c = client();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: E = serde_json::from_value(case["input"].clone()).unwrap();

        // Verify build
        let built = c.build(&input);
        if let Some(expected) = case.get("expected_validation_error") {
            match built {
                Err(NewsApiError::Validation(err)) => {
                    assert_eq!(variant_name(&err), expected.as_str().unwrap(), "{name}: rule")
                }
                other => panic!("{name}: expected validation error, got {other:?}"),
            }
            continue;
        }
        let req = built.unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, HttpMethod::Get, "{name}: method");
        assert_eq!(
            req.method.as_str(),
            expected_req["method"].as_str().unwrap(),
            "{name}: method"
        );
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );
        assert_eq!(req.header("X-Api-Key"), Some(API_KEY), "{name}: key header");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse::<E>(response);

        if let Some(code) = case.get("expected_api_error") {
            match result {
                Err(NewsApiError::Api(api)) => {
                    assert_eq!(api.kind.as_code(), code.as_str().unwrap(), "{name}: code")
                }
                other => panic!("{name}: expected api error, got {other:?}"),
            }
        } else {
            let expected: E::Response = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

#[test]
fn top_headlines_test_vectors() {
    run_vectors::<TopHeadlinesOptions>(include_str!("../../test-vectors/top_headlines.json"));
}

#[test]
fn everything_test_vectors() {
    run_vectors::<EverythingOptions>(include_str!("../../test-vectors/everything.json"));
}

#[test]
fn sources_test_vectors() {
    run_vectors::<SourcesOptions>(include_str!("../../test-vectors/sources.json"));
}
