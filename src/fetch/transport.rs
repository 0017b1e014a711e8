//! HTTP seam for the DBLP client.

use crate::error::FetchError;
use std::time::Duration;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Response body; left empty for non-success statuses
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// A blocking HTTP GET.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status, and [`FetchError::Transport`] when no response arrived at all.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        (**self).get(url, query)
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        let transport_error = |err: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = if response.status().is_success() {
            response.text().map_err(transport_error)?
        } else {
            String::new()
        };

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(200, true, false)]
    #[case(204, true, false)]
    #[case(301, false, false)]
    #[case(429, false, true)]
    #[case(500, false, false)]
    fn test_response_classification(
        #[case] status: u16,
        #[case] success: bool,
        #[case] rate_limited: bool,
    ) {
        let response = HttpResponse {
            status,
            body: String::new(),
        };
        assert_eq!(response.is_success(), success);
        assert_eq!(response.is_rate_limited(), rate_limited);
    }
}
