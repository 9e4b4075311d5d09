//! Catalog object lookup.
//!
//! One record per request, keyed by the object's EDAN id. Every failure
//! mode (bad URL, network error, non-success status, malformed body, no
//! media) degrades to "no image" with a warning; nothing here ever
//! propagates an error to the enrichment loop.

use url::Url;

/// Resolves an object id to its first catalog image URL, if any.
///
/// The seam exists so the cached resolver can be exercised with a test
/// double instead of the live API.
pub trait ObjectLookup: Send + Sync {
    fn first_image_url(&self, id: &str) -> Option<String>;
}

/// Blocking client for the Smithsonian open-access content endpoint.
pub struct CatalogClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// Error constructing the catalog client.
pub struct CatalogError {
    pub message: String,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(
                "Mozilla/5.0 (compatible; Ordinaries/0.2; ",
                "+https://github.com/ext-sakamoro/ordinaries)"
            ))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| CatalogError {
                message: format!("Client error: {}", e),
            })?;
        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }
}

impl ObjectLookup for CatalogClient {
    fn first_image_url(&self, id: &str) -> Option<String> {
        let raw = format!("{}{}?api_key={}", self.base_url, id, self.api_key);
        let parsed = match Url::parse(&raw) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("Bad catalog URL for {}: {}", id, e);
                return None;
            }
        };

        let response = match self.client.get(parsed.as_str()).send() {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Catalog request failed for {}: {}", id, e);
                return None;
            }
        };

        if !response.status().is_success() {
            log::warn!("Catalog returned {} for {}", response.status(), id);
            return None;
        }

        let body: serde_json::Value = match response.json() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Malformed catalog body for {}: {}", id, e);
                return None;
            }
        };

        primary_image_url(&body)
    }
}

/// First media entry's content URL from a catalog response body, or `None`
/// when any level of the nesting is absent.
pub fn primary_image_url(body: &serde_json::Value) -> Option<String> {
    body.pointer("/response/content/descriptiveNonRepeating/online_media/media/0/content")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
