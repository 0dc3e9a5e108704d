use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::Config,
    error::{GatewayError, Result},
};

/// Raw access to the upstream `Client` collection. Bodies are returned as received.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn list_all(&self) -> Result<Value>;
    async fn get_one(&self, id: &str) -> Result<Value>;
    async fn update_one(&self, id: &str, data: &Value) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct Base44Client {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl Base44Client {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(GatewayError::from)?;
        Ok(Self {
            http,
            base_url: config.upstream_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/{id}` with `id` percent-encoded as a single path segment.
    pub fn record_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let Some(api_key) = &self.api_key else {
            return Err(GatewayError::Config(
                "API_KEY is not configured; refusing to call upstream".to_string(),
            ));
        };
        Ok(self
            .http
            .request(method, url)
            .header("api_key", api_key)
            .header(CONTENT_TYPE, "application/json"))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Upstream responded");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(
                        status = status.as_u16(),
                        error = %err.without_url(),
                        "Failed reading upstream error body"
                    );
                    "failed to read upstream error body".to_string()
                }
            };
            warn!(status = status.as_u16(), "Upstream returned an error status");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| {
            GatewayError::UnexpectedShape(format!("upstream body is not valid JSON: {err}"))
        })
    }
}

#[async_trait]
impl ClientStore for Base44Client {
    async fn list_all(&self) -> Result<Value> {
        let request = self.request(Method::GET, self.base_url.clone())?;
        self.execute(request).await
    }

    async fn get_one(&self, id: &str) -> Result<Value> {
        let request = self.request(Method::GET, self.record_url(id))?;
        self.execute(request).await
    }

    async fn update_one(&self, id: &str, data: &Value) -> Result<Value> {
        let request = self.request(Method::PUT, self.record_url(id))?.json(data);
        self.execute(request).await
    }
}
