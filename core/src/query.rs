//! Query-string encoding for options values.
//!
//! Each options type lists its fields through `QueryParams::write_params` in
//! declaration order; `QueryBuilder` applies the per-kind formatting and drops
//! unset values. Values are written verbatim, without percent-encoding.

use chrono::{DateTime, SecondsFormat, Utc};

/// A value that can be flattened into query parameters.
pub trait QueryParams {
    /// Write every field, in declaration order, keyed by its lowercased name.
    fn write_params(&self, query: &mut QueryBuilder);
}

/// Accumulates `key=value&` pairs, skipping unset values.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    buf: String,
}

impl QueryBuilder {
    /// Text field; skipped when empty.
    pub fn text(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.pair(key, value);
        }
        self
    }

    /// Unsigned counter; skipped when zero.
    pub fn count(&mut self, key: &str, value: u32) -> &mut Self {
        if value != 0 {
            self.pair(key, &value.to_string());
        }
        self
    }

    /// Timestamp as RFC 3339 with whole seconds; skipped when absent.
    pub fn timestamp(&mut self, key: &str, value: Option<&DateTime<Utc>>) -> &mut Self {
        if let Some(ts) = value {
            self.pair(key, &ts.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        self
    }

    /// List of strings; skipped when empty. Every element, including the
    /// last, is followed by a comma.
    pub fn list(&mut self, key: &str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            let joined: String = values.iter().map(|v| format!("{v},")).collect();
            self.pair(key, &joined);
        }
        self
    }

    fn pair(&mut self, key: &str, value: &str) {
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(value);
        self.buf.push('&');
    }
}

/// Append the encoded `params` to `base_url`.
///
/// The `?` is always present, even when no field is set.
pub fn encode<P: QueryParams + ?Sized>(base_url: &str, params: &P) -> String {
    let mut query = QueryBuilder::default();
    params.write_params(&mut query);

    let mut url = format!("{base_url}?{}", query.buf);
    if url.ends_with('&') {
        url.pop();
    }
    url
}
