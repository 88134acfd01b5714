//! reqwest-backed client

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use super::{HttpError, HttpResponse};

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Client sending `user_agent` on every request and giving up after
    /// `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::RequestFailed {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// GET `base` with `query` appended as URL-encoded parameters.
    pub async fn get_query(
        &self,
        base: &str,
        query: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let url = build_url(base, query)?;
        tracing::trace!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::RequestFailed {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(HttpError::RateLimited);
        }

        let body = response.text().await.map_err(|e| HttpError::Body {
            message: e.to_string(),
        })?;

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn build_url(base: &str, query: &[(&str, &str)]) -> Result<Url, HttpError> {
    Url::parse_with_params(base, query).map_err(|_| HttpError::InvalidUrl {
        url: base.to_string(),
    })
}
