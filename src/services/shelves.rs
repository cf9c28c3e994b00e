//! Shelf service: shelf list, shelf creation and shelf unit lookups

use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::AppConfig,
    error::{ClientError, ClientResult},
    models::shelf::{CreateShelfPayload, ShelfRecord, ShelfUnitDetail},
    normalize::{self, parse_shelf_list, parse_shelf_unit_detail},
    services::unit_cache::{UnitCache, UnitLookup},
    transport::{HttpResponse, HttpTransport, ReqwestTransport},
};

/// Options for [`ShelvesClient::fetch_shelves`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchShelvesOptions {
    /// Overrides the transport's default timeout for this request
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct ShelvesClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    units: UnitCache,
}

impl ShelvesClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>, units: UnitCache) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            units,
        }
    }

    /// Build a client talking to the configured API over reqwest
    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::new(
            Arc::new(transport),
            config.api.base_url.clone(),
            UnitCache::new(config.cache_policy()),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn unit_cache(&self) -> &UnitCache {
        &self.units
    }

    /// Fetch all shelves
    ///
    /// A non-2xx status is an error carrying the status. A successful body
    /// that is not an array yields an empty list; malformed entries are
    /// dropped. Nothing is cached.
    pub async fn fetch_shelves(&self, options: &FetchShelvesOptions) -> ClientResult<Vec<ShelfRecord>> {
        let url = endpoint(&self.base_url, &["shelves"])?;
        let response = self.transport.get(url.as_str(), options.timeout).await?;

        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                context: "Failed to load shelves".to_string(),
            });
        }

        let payload = response.json()?;
        let shelves = parse_shelf_list(&payload);
        tracing::debug!("Loaded {} shelves", shelves.len());
        Ok(shelves)
    }

    /// Create a shelf
    pub async fn create_shelf(&self, payload: &CreateShelfPayload) -> ClientResult<()> {
        let url = endpoint(&self.base_url, &["shelves"])?;
        let body = serde_json::to_value(payload)?;
        let response = self.transport.post_json(url.as_str(), &body).await?;

        if !response.is_success() {
            let message = rejection_message(&response);
            tracing::warn!("Shelf {} rejected (HTTP {}): {}", payload.id, response.status, message);
            return Err(ClientError::Rejected(message));
        }

        tracing::info!("Created shelf {}", payload.id);
        Ok(())
    }

    /// Look up a shelf unit, keeping the reason when nothing was found
    ///
    /// The id is trimmed; a blank id is `NotFound` without touching the
    /// cache. At most one request per id is made, see [`UnitCache`].
    pub async fn lookup_shelf_unit(&self, unit_id: &str) -> UnitLookup {
        let key = unit_id.trim();
        if key.is_empty() {
            return UnitLookup::NotFound;
        }

        let transport = Arc::clone(&self.transport);
        let base_url = self.base_url.clone();
        let id = key.to_string();

        self.units
            .get_or_fetch(key, move || async move {
                request_unit(transport.as_ref(), &base_url, &id).await
            })
            .await
    }

    /// Look up a shelf unit
    ///
    /// Not found, malformed payloads and failures all come back as `None`;
    /// use [`lookup_shelf_unit`](Self::lookup_shelf_unit) to tell them apart.
    pub async fn fetch_shelf_unit_detail(&self, unit_id: &str) -> Option<ShelfUnitDetail> {
        self.lookup_shelf_unit(unit_id).await.into_detail()
    }
}

/// Append percent-encoded path segments to the base URL
fn endpoint(base_url: &str, segments: &[&str]) -> ClientResult<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{}: cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

async fn request_unit(transport: &dyn HttpTransport, base_url: &str, unit_id: &str) -> UnitLookup {
    match fetch_unit(transport, base_url, unit_id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Failed to load shelf unit {}: {}", unit_id, e);
            UnitLookup::Failed(e.to_string())
        }
    }
}

async fn fetch_unit(transport: &dyn HttpTransport, base_url: &str, unit_id: &str) -> ClientResult<UnitLookup> {
    let url = endpoint(base_url, &["shelves", "unit", unit_id])?;
    let response = transport.get(url.as_str(), None).await?;

    if response.status == 404 {
        return Ok(UnitLookup::NotFound);
    }

    if !response.is_success() {
        return Err(ClientError::Http {
            status: response.status,
            context: format!("Failed to load shelf unit {}", unit_id),
        });
    }

    let payload = response.json()?;
    match parse_shelf_unit_detail(&payload) {
        Some(detail) => Ok(UnitLookup::Found(detail)),
        None => {
            tracing::debug!("Shelf unit {} payload has no usable id", unit_id);
            Ok(UnitLookup::Malformed)
        }
    }
}

/// Error text for a refused request: the body's `message`, else the reason phrase
fn rejection_message(response: &HttpResponse) -> String {
    response
        .json()
        .ok()
        .and_then(|body| normalize::normalize_string(body.get("message")))
        .or_else(|| response.reason.clone().filter(|reason| !reason.is_empty()))
        .unwrap_or_else(|| "Unknown error".to_string())
}
