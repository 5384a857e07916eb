//! HTTP client for the storefront API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use http::StatusCode;
use medishop_commerce::catalog::{Medicine, MedicineListResponse, MedicineResponse};
use medishop_commerce::checkout::{
    OrderHistoryResponse, OrderRequest, OrderResponse, OrderSummary, PrescriptionFile,
};
use medishop_commerce::services::{CatalogService, OrderService, ServiceError, UploadService};
use medishop_commerce::ProductId;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::dependency::DependencyTag;
use crate::timeout::Timeouts;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http {
        status: StatusCode,
        url: String,
        /// `message` field of the error body, when there is one.
        message: Option<String>,
    },

    #[error("Timeout: {dependency} did not answer within {after:?}")]
    Timeout {
        dependency: DependencyTag,
        after: Duration,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl From<FetchError> for ServiceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Http {
                status, message, ..
            } => ServiceError::Rejected {
                status: Some(status.as_u16()),
                message,
            },
            FetchError::Deserialization(msg) => ServiceError::InvalidResponse(msg),
            other => ServiceError::Unavailable(other.to_string()),
        }
    }
}

/// Where the API lives and how to authenticate.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the storefront API, e.g. `https://api.example.com/api/v1`.
    pub base_url: String,
    /// Endpoint accepting multipart image uploads.
    pub upload_url: String,
    /// Bearer token sent to the storefront API. Never sent to the upload host.
    pub access_token: Option<String>,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, upload_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upload_url: upload_url.into(),
            access_token: None,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

/// Client for the catalog, order and upload services.
///
/// Each call is tagged with its [`DependencyTag`] and bounded by that
/// dependency's timeout. Failures are returned as-is; nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    upload: Url,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let base = parse_url(&config.base_url)?;
        let upload = parse_url(&config.upload_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect())
            .user_agent(concat!("medishop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base,
            upload,
            config,
        })
    }

    /// Build `{base}/{segments...}`, escaping each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::Request(format!("not a base URL: {}", self.base)))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        tag: DependencyTag,
    ) -> Result<T, FetchError> {
        let req = self.authorized(self.http.get(url.clone()));
        self.send(req, &url, tag).await
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        tag: DependencyTag,
    ) -> Result<T, FetchError> {
        let req = self.authorized(self.http.post(url.clone()).json(body));
        self.send(req, &url, tag).await
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        url: &Url,
        tag: DependencyTag,
    ) -> Result<T, FetchError> {
        let timeout = self.config.timeouts.for_tag(tag);
        let started = Instant::now();

        let resp = req.timeout(timeout.total).send().await.map_err(|e| {
            warn!(dependency = %tag, url = %url, error = %e, "request failed");
            if e.is_timeout() {
                FetchError::Timeout {
                    dependency: tag,
                    after: timeout.total,
                }
            } else if e.is_connect() {
                FetchError::Connection(e.to_string())
            } else {
                FetchError::Request(e.to_string())
            }
        })?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        debug!(
            dependency = %tag,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response"
        );

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
                message: error_message(&bytes),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl CatalogService for ApiClient {
    async fn list_medicines(&self, search: Option<&str>) -> Result<Vec<Medicine>, ServiceError> {
        let mut url = self.endpoint(&["medicines"])?;
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("search", term);
        }
        let resp: MedicineListResponse = self.get_json(url, DependencyTag::Catalog).await?;
        Ok(resp.into_medicines())
    }

    async fn get_medicine(&self, id: &ProductId) -> Result<Option<Medicine>, ServiceError> {
        let url = self.endpoint(&["medicines", id.as_str()])?;
        match self
            .get_json::<MedicineResponse>(url, DependencyTag::Catalog)
            .await
        {
            Ok(resp) => Ok(resp.data),
            Err(FetchError::Http { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl OrderService for ApiClient {
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResponse, ServiceError> {
        let url = self.endpoint(&["orders"])?;
        Ok(self.post_json(url, order, DependencyTag::Orders).await?)
    }

    async fn my_orders(&self) -> Result<Vec<OrderSummary>, ServiceError> {
        let url = self.endpoint(&["orders", "my-orders"])?;
        let resp: OrderHistoryResponse = self.get_json(url, DependencyTag::Orders).await?;
        Ok(resp.data)
    }
}

#[async_trait]
impl UploadService for ApiClient {
    async fn upload(&self, file: &PrescriptionFile) -> Result<String, ServiceError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| FetchError::Request(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let req = self.http.post(self.upload.clone()).multipart(form);
        let resp: UploadResponse = self.send(req, &self.upload, DependencyTag::Upload).await?;
        resp.into_url()
            .ok_or_else(|| ServiceError::InvalidResponse("upload response has no URL".to_string()))
    }
}

/// Reply from the image host.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
    display_url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> Option<String> {
        let data = self.data?;
        [data.url, data.display_url]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw.trim()).map_err(|e| FetchError::Request(format!("invalid URL {raw:?}: {e}")))
}

/// Pull `message` out of a JSON error body.
fn error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}
