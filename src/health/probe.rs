//! Liveness probing.
//!
//! # Responsibilities
//! - Send one cheap request to a backend and report the status code
//! - Follow redirects (up to `MAX_REDIRECTS`) and report the final status
//! - Surface transport failures as `ProbeError`, never panic

use std::future::Future;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use url::Url;

/// Why a probe produced no status code.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to build probe request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("connection error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("redirect from {from} has no usable Location")]
    InvalidRedirect { from: Url },

    #[error("stopped after {} redirects", MAX_REDIRECTS)]
    TooManyRedirects,
}

/// Redirect hops followed before a probe gives up.
pub const MAX_REDIRECTS: usize = 10;

/// A liveness check against a backend address.
pub trait Probe: Send + Sync + 'static {
    fn probe(&self, address: &Url) -> impl Future<Output = Result<StatusCode, ProbeError>> + Send;
}

/// `HEAD` request against the backend's base URL.
#[derive(Clone)]
pub struct HttpProbe {
    client: Client<HttpConnector, Body>,
}

impl HttpProbe {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new())
            .build(HttpConnector::new());

        Self { client }
    }

    async fn head(&self, url: &Url) -> Result<(StatusCode, Option<String>), ProbeError> {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri(url.as_str())
            .header("user-agent", "lb-proxy-health-check")
            .body(Body::empty())?;

        let response = self.client.request(request).await?;
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok((response.status(), location))
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

impl Probe for HttpProbe {
    async fn probe(&self, address: &Url) -> Result<StatusCode, ProbeError> {
        let mut url = address.clone();

        for _ in 0..=MAX_REDIRECTS {
            let (status, location) = self.head(&url).await?;
            if !is_redirect(status) {
                return Ok(status);
            }

            // Relative locations resolve against the URL that answered.
            url = location
                .and_then(|location| url.join(&location).ok())
                .ok_or_else(|| ProbeError::InvalidRedirect { from: url.clone() })?;
            tracing::trace!(addr = %address, next = %url, status = %status, "Following redirect");
        }

        Err(ProbeError::TooManyRedirects)
    }
}
