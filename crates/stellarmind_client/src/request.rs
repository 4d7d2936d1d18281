//! Outbound request description.

use reqwest::{Method, Url};

/// Query parameters whose values never appear in logs or error messages.
const SECRET_PARAMS: &[&str] = &["key", "api_key"];

/// One logical outbound request.
///
/// # Examples
///
/// ```
/// use stellarmind_client::OutboundRequest;
///
/// let request = OutboundRequest::builder()
///     .url("https://example.test/v1/models/m:generateContent?key=secret")
///     .body(serde_json::json!({"contents": []}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.method(), &reqwest::Method::POST);
/// assert!(!request.redacted_url().contains("secret"));
/// ```
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into))]
pub struct OutboundRequest {
    /// HTTP method
    #[builder(default = "Method::POST")]
    method: Method,
    /// Full target URL including query string
    url: String,
    /// Extra request headers
    #[builder(default)]
    headers: Vec<(String, String)>,
    /// JSON body
    #[builder(default, setter(strip_option))]
    body: Option<serde_json::Value>,
}

impl OutboundRequest {
    /// Creates a new request builder.
    pub fn builder() -> OutboundRequestBuilder {
        OutboundRequestBuilder::default()
    }

    /// JSON POST to `url`.
    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    /// Target URL with credential query parameters masked.
    pub fn redacted_url(&self) -> String {
        let Ok(mut url) = Url::parse(&self.url) else {
            return self.url.clone();
        };
        if url.query().is_none() {
            return url.to_string();
        }
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(name, value)| {
                let value = if SECRET_PARAMS.iter().any(|secret| *secret == name) {
                    "REDACTED".to_string()
                } else {
                    value.into_owned()
                };
                (name.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}
