//! HTTP client implementation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    types::{status_line, HeaderFields, HttpRequest, HttpResponse, HttpVersion},
};

/// Mockable HTTP transport trait
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Perform one round trip of `request` against `origin`
    /// (e.g. `http://localhost:3000`).
    ///
    /// Any status code is returned as a response; only failures that leave
    /// no response behind are errors.
    async fn request(&self, origin: &str, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Build the reqwest client described by `config`
    pub fn new(config: HttpConfig) -> Result<Self> {
        let redirect = match config.max_redirects {
            0 => reqwest::redirect::Policy::none(),
            max => reqwest::redirect::Policy::limited(max),
        };

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(redirect);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(format!("{proxy_url}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        builder = if config.pool_enabled {
            builder.pool_idle_timeout(config.pool_idle_timeout)
        } else {
            builder.pool_max_idle_per_host(0)
        };

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        debug!("HTTP client ready (timeout {:?})", config.timeout);
        Ok(Self { inner, config })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

/// GET and DELETE requests must not carry a body
pub(crate) fn check_body_allowed(request: &HttpRequest) -> Result<()> {
    if !request.method.allows_body() && !request.body.is_empty() {
        return Err(HttpError::IncorrectMethod(
            "Request body must be empty.".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn request(&self, origin: &str, request: &HttpRequest) -> Result<HttpResponse> {
        check_body_allowed(request)?;

        let url = format!("{origin}{}", request.uri)
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        debug!("HTTP {}: {}", request.method, url);

        let mut builder = self.inner.request(request.method.into(), url);

        for (name, value) in &request.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
            builder = builder.header(name, value);
        }

        if let Some(mime) = &request.mime {
            builder = builder.header(CONTENT_TYPE, mime.as_str());
        }

        if request.method.allows_body() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await.map_err(HttpError::RequestFailed)?;

        let status_code = response.status().as_u16();
        let version = HttpVersion::from(response.version());

        // Headers that are not visible ASCII are dropped
        let headers: HeaderFields = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(HttpError::RequestFailed)?;

        debug!("HTTP {} {} -> {}", request.method, request.uri, status_code);

        Ok(HttpResponse {
            status_code,
            status_line: status_line(version, status_code),
            version,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Create a shared HTTP client (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}
