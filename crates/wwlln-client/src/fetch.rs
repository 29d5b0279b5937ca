//! Single GET of the strike feed plus decoding.

use reqwest::{Client, Url};
use wwlln_core::StrikeSnapshot;

use crate::error::{FetchCause, WwllnError};

/// Extra request headers and query parameters. Empty by default.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

/// Performs one GET against `url` and decodes the body as a strike snapshot.
///
/// The body is parsed regardless of the declared `Content-Type`; the feed has
/// been known to serve JSON as `text/html`.
///
/// # Errors
///
/// Every failure (connect, timeout, non-2xx status, unreadable body, bad
/// JSON) is reported as [`WwllnError::TransientFetch`].
pub(crate) async fn fetch_snapshot(
    http: &Client,
    url: &Url,
    options: &FetchOptions,
) -> Result<StrikeSnapshot, WwllnError> {
    let transient = |source: FetchCause| WwllnError::TransientFetch {
        url: url.to_string(),
        source,
    };

    let mut request = http.get(url.clone());
    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    if !options.params.is_empty() {
        request = request.query(&options.params);
    }

    let response = request.send().await.map_err(|e| transient(e.into()))?;
    let response = response.error_for_status().map_err(|e| transient(e.into()))?;
    let body = response.text().await.map_err(|e| transient(e.into()))?;
    let snapshot = StrikeSnapshot::from_feed_json(&body).map_err(|e| transient(e.into()))?;

    tracing::debug!(url = %url, strikes = snapshot.len(), "fetched strike feed");
    Ok(snapshot)
}
