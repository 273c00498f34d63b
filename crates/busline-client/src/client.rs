//! HTTP client for the busline backend

use crate::config::ClientConfig;
use crate::error::ClientError;
use async_trait::async_trait;
use busline_model::{
    Category, CategoryProvider, DeleteError, FetchError, PageRequest, Record, RecordDeleter,
    RecordId, RecordPage, RecordProvider,
};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Wire shape of a record listing
#[derive(Debug, Deserialize)]
struct ItemsResponse {
    data: Vec<Record>,
    count: u64,
}

/// REST client implementing every busline provider
#[derive(Debug, Clone)]
pub struct BuslineClient {
    http: Client,
    api_root: Url,
}

impl BuslineClient {
    /// Create client from configuration
    ///
    /// # Errors
    /// - `ClientError::InvalidBaseUrl` if `base_url` cannot carry a path
    /// - `ClientError::Build` if the HTTP client cannot be constructed
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };
        let mut api_root = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
        api_root
            .path_segments_mut()
            .map_err(|()| invalid("url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(config.api_prefix.split('/').filter(|s| !s.is_empty()));

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, api_root })
    }

    /// Root every endpoint is resolved against
    #[inline]
    #[must_use]
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Fetch all line names
    ///
    /// # Errors
    /// Any transport, status or decode failure.
    pub async fn list_buses(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint(&["buses", ""]);
        tracing::debug!(%url, "listing bus lines");
        let response = self.http.get(url).send().await.map_err(ClientError::Request)?;
        read_json(response).await
    }

    /// Fetch one page of records for a line
    ///
    /// # Errors
    /// Any transport, status or decode failure.
    pub async fn items_by_bus(
        &self,
        category: &Category,
        page: PageRequest,
    ) -> Result<RecordPage, ClientError> {
        let url = self.endpoint(&["items", "bus", category.as_str()]);
        tracing::debug!(%url, offset = page.offset(), limit = page.limit(), "listing records");
        let response = self
            .http
            .get(url)
            .query(&[("skip", page.offset()), ("limit", u64::from(page.limit()))])
            .send()
            .await
            .map_err(ClientError::Request)?;
        let items: ItemsResponse = read_json(response).await?;
        Ok(RecordPage::from_window(items.data, items.count, page.offset()))
    }

    /// Delete one record
    ///
    /// # Errors
    /// Any transport failure or non-success status.
    pub async fn delete_item(&self, id: RecordId) -> Result<(), ClientError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["items", id_segment.as_str()]);
        tracing::debug!(%url, "deleting record");
        let response = self.http.delete(url).send().await.map_err(ClientError::Request)?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(status_error(response).await)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // api_root was checked to be a base in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Build a status error, preferring the backend's `detail` message
async fn status_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value.get("detail").map(|detail| match detail.as_str() {
                Some(text) => text.to_string(),
                None => detail.to_string(),
            })
        })
        .unwrap_or_else(|| String::from_utf8_lossy(&body).to_string());
    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CategoryProvider for BuslineClient {
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.list_buses().await.map_err(FetchError::from)
    }
}

#[async_trait]
impl RecordProvider for BuslineClient {
    async fn list_records_by_category(
        &self,
        category: &Category,
        page: PageRequest,
    ) -> Result<RecordPage, FetchError> {
        self.items_by_bus(category, page)
            .await
            .map_err(FetchError::from)
    }
}

#[async_trait]
impl RecordDeleter for BuslineClient {
    async fn delete_record(&self, id: RecordId) -> Result<(), DeleteError> {
        match self.delete_item(id).await {
            Ok(()) => Ok(()),
            Err(ClientError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(DeleteError::NotFound(id))
            }
            Err(err) => Err(err.into()),
        }
    }
}
