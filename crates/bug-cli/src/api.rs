//! HTTP client for the `/api` surface.
//!
//! [`BugApi`] is the seam the form and board logic are written against;
//! [`BugClient`] is the reqwest implementation. Calls are made once: no
//! retries and no request timeout.

use std::future::Future;

use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use bug_core::entities::Bug;
use bug_core::input::BugInput;
use bug_core::responses::{ErrorResponse, HealthResponse, MessageResponse};

use crate::error::ClientError;

/// Operations the client needs from the bug tracker API.
pub trait BugApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Bug>, ClientError>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Bug, ClientError>> + Send;

    fn create(&self, input: &BugInput) -> impl Future<Output = Result<Bug, ClientError>> + Send;

    fn update(
        &self,
        id: &str,
        input: &BugInput,
    ) -> impl Future<Output = Result<Bug, ClientError>> + Send;

    fn delete(&self, id: &str)
    -> impl Future<Output = Result<MessageResponse, ClientError>> + Send;

    fn health(&self) -> impl Future<Output = Result<HealthResponse, ClientError>> + Send;
}

/// reqwest-backed [`BugApi`].
#[derive(Debug, Clone)]
pub struct BugClient {
    http: reqwest::Client,
    server: Url,
}

impl BugClient {
    /// Client for the server at `server_url` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `server_url` is not an absolute
    /// URL that paths can be appended to.
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let server = Url::parse(server_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{server_url}: {e}")))?;
        if server.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{server_url}: not a base URL"
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            server,
        })
    }

    /// `/api` followed by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.server.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        debug!(%method, %url, "sending request");
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        decode(request.send().await?).await
    }
}

/// Turn a response into `T`, or into `ClientError::Api` carrying the
/// server's error message.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    debug!(status = status.as_u16(), %message, "request rejected");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

impl BugApi for BugClient {
    async fn list(&self) -> Result<Vec<Bug>, ClientError> {
        self.send::<(), _>(Method::GET, &["bugs"], None).await
    }

    async fn get(&self, id: &str) -> Result<Bug, ClientError> {
        self.send::<(), _>(Method::GET, &["bugs", id], None).await
    }

    async fn create(&self, input: &BugInput) -> Result<Bug, ClientError> {
        self.send(Method::POST, &["bugs"], Some(input)).await
    }

    async fn update(&self, id: &str, input: &BugInput) -> Result<Bug, ClientError> {
        self.send(Method::PUT, &["bugs", id], Some(input)).await
    }

    async fn delete(&self, id: &str) -> Result<MessageResponse, ClientError> {
        self.send::<(), _>(Method::DELETE, &["bugs", id], None)
            .await
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.send::<(), _>(Method::GET, &["health"], None).await
    }
}
