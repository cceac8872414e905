use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{ChatRequest, ChatResponse, Collection};

/// Backend used when neither a flag nor the environment names one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_ENV: &str = "SALESBOT_BACKEND_URL";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The backend operations the chat session depends on.
///
/// [`Backend`] implements this over HTTP; tests substitute an in-memory double.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one chat message and decodes the reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Fetches one collection.  Only its length is used.
    async fn collection(&self, collection: Collection) -> Result<Vec<serde_json::Value>>;
}

/// HTTP client for the sales agent backend.
#[derive(Debug, Clone)]
pub struct Backend {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl Backend {
    /// Create a new backend client.
    ///
    /// The base URL is read from the `SALESBOT_BACKEND_URL` environment variable, falling
    /// back to `http://localhost:8001`.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// An explicit `base_url` takes precedence over the environment.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = resolve_base_url(base_url, env::var(BACKEND_URL_ENV).ok());
        let base_url = parse_base_url(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves `api/<path>` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join("api/")?.join(path)?)
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // FastAPI reports failures as {"detail": ...}
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<serde_json::Value>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|parsed| parsed.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or(error_body);
        Error::api(status_code, message)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T> {
        let response = self
            .client
            .get(url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl ChatBackend for Backend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint("chat")?;

        let response = self
            .client
            .post(url)
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    async fn collection(&self, collection: Collection) -> Result<Vec<serde_json::Value>> {
        let url = self.endpoint(collection.path())?;
        self.get_json(url).await
    }
}

/// Picks the backend URL: an explicit value, then the environment, then the default.
/// Blank values are skipped.
fn resolve_base_url(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .into_iter()
        .chain(env)
        .find(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

/// Parses a base URL, making sure its path ends in `/` so relative joins append.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::validation(
            format!("{raw} cannot be used as a base URL"),
            Some("backend_url".to_string()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
