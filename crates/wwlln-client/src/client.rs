//! HTTP client for the WWLLN lightning-strike feed.
//!
//! Wraps `reqwest` with a per-client snapshot cache, a single-retry policy,
//! and the proximity filters from `wwlln-core`. Every public read goes
//! through the cache, so repeated queries inside the TTL cost no requests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Url};
use tokio_util::sync::CancellationToken;
use wwlln_core::{filter, ClientConfig, NearbyStrike, StrikeSnapshot, Unit};

use crate::cache::SnapshotCache;
use crate::error::WwllnError;
use crate::fetch::{fetch_snapshot, FetchOptions};
use crate::retry::retry_once;

/// Client for the WWLLN strike feed.
///
/// Each instance owns its cache; two clients never share snapshots. Use
/// [`WwllnClient::new`] to build the HTTP client from configuration, or
/// [`WwllnClient::with_http_client`] to supply your own `reqwest::Client`.
pub struct WwllnClient {
    http: Client,
    feed_url: Url,
    retry_delay: Duration,
    cache: SnapshotCache,
}

impl WwllnClient {
    /// Creates a client with its own `reqwest::Client` configured from
    /// `config` (timeout and `User-Agent`).
    ///
    /// # Errors
    ///
    /// Returns [`WwllnError::ClientBuild`] if the HTTP client cannot be
    /// constructed, or [`WwllnError::InvalidUrl`] if `config.feed_url` does
    /// not parse.
    pub fn new(config: &ClientConfig) -> Result<Self, WwllnError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(WwllnError::ClientBuild)?;
        Self::with_http_client(http, config)
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`WwllnError::InvalidUrl`] if `config.feed_url` does not parse.
    pub fn with_http_client(http: Client, config: &ClientConfig) -> Result<Self, WwllnError> {
        let feed_url = Url::parse(&config.feed_url).map_err(|e| WwllnError::InvalidUrl {
            url: config.feed_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            feed_url,
            retry_delay: config.retry_delay(),
            cache: SnapshotCache::new(config.cache_ttl()),
        })
    }

    #[must_use]
    pub fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Returns the full current snapshot, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`WwllnError::RecurringFetch`] if the feed fails twice in a row.
    pub async fn dump(&self) -> Result<Arc<StrikeSnapshot>, WwllnError> {
        self.snapshot(None).await
    }

    /// Like [`dump`](Self::dump), but gives up with [`WwllnError::Cancelled`]
    /// as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// As [`dump`](Self::dump), plus [`WwllnError::Cancelled`].
    pub async fn dump_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Arc<StrikeSnapshot>, WwllnError> {
        self.snapshot(Some(cancel)).await
    }

    /// Returns the strike nearest to the given point, with its distance in
    /// kilometres.
    ///
    /// # Errors
    ///
    /// - [`WwllnError::EmptyInput`] if the feed currently holds no strikes.
    /// - [`WwllnError::RecurringFetch`] if the feed fails twice in a row.
    pub async fn nearest(&self, latitude: f64, longitude: f64) -> Result<NearbyStrike, WwllnError> {
        let snapshot = self.snapshot(None).await?;
        Ok(filter::nearest(&snapshot, latitude, longitude)?)
    }

    /// Cancellable form of [`nearest`](Self::nearest).
    ///
    /// # Errors
    ///
    /// As [`nearest`](Self::nearest), plus [`WwllnError::Cancelled`].
    pub async fn nearest_with_cancel(
        &self,
        latitude: f64,
        longitude: f64,
        cancel: &CancellationToken,
    ) -> Result<NearbyStrike, WwllnError> {
        let snapshot = self.snapshot(Some(cancel)).await?;
        Ok(filter::nearest(&snapshot, latitude, longitude)?)
    }

    /// Returns every strike within `radius` of the given point, keyed by id.
    ///
    /// `unit` must be `"metric"` (kilometres) or `"imperial"` (miles). When
    /// `window` is set, strikes observed longer ago than `window` are dropped.
    ///
    /// # Errors
    ///
    /// - [`WwllnError::InvalidArgument`] for an unknown `unit`, before any
    ///   request is made.
    /// - [`WwllnError::RecurringFetch`] if the feed fails twice in a row.
    pub async fn within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
        unit: &str,
        window: Option<Duration>,
    ) -> Result<BTreeMap<String, NearbyStrike>, WwllnError> {
        let unit: Unit = unit.parse()?;
        let snapshot = self.snapshot(None).await?;
        Ok(filter::within_radius(
            &snapshot,
            latitude,
            longitude,
            radius,
            unit,
            window,
            Utc::now(),
        ))
    }

    /// Cancellable form of [`within_radius`](Self::within_radius).
    ///
    /// # Errors
    ///
    /// As [`within_radius`](Self::within_radius), plus [`WwllnError::Cancelled`].
    pub async fn within_radius_with_cancel(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
        unit: &str,
        window: Option<Duration>,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<String, NearbyStrike>, WwllnError> {
        let unit: Unit = unit.parse()?;
        let snapshot = self.snapshot(Some(cancel)).await?;
        Ok(filter::within_radius(
            &snapshot,
            latitude,
            longitude,
            radius,
            unit,
            window,
            Utc::now(),
        ))
    }

    /// Performs one uncached, unretried request against the feed.
    ///
    /// # Errors
    ///
    /// Returns [`WwllnError::TransientFetch`] on any network, status, or
    /// decode failure.
    pub async fn request(&self, options: &FetchOptions) -> Result<StrikeSnapshot, WwllnError> {
        fetch_snapshot(&self.http, &self.feed_url, options).await
    }

    /// Drops the cached snapshot so the next read hits the feed.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    async fn snapshot(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Arc<StrikeSnapshot>, WwllnError> {
        let read = self.cache.get_or_refresh(|| self.fetch_with_retry());
        match cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(WwllnError::Cancelled),
                result = read => result,
            },
            None => read.await,
        }
    }

    async fn fetch_with_retry(&self) -> Result<StrikeSnapshot, WwllnError> {
        let options = FetchOptions::default();
        retry_once(self.retry_delay, |_| {
            fetch_snapshot(&self.http, &self.feed_url, &options)
        })
        .await
    }
}
