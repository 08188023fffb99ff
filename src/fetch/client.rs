//! Generic HTTP-JSON fetching with bounded retry on rate limiting.

use crate::fetch::error::FetchError;
use crate::fetch::retry::RetryPolicy;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Issues GET requests and decodes JSON bodies, retrying on HTTP 429.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    policy: RetryPolicy,
}

impl FetchClient {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_client(Client::new(), policy)
    }

    pub fn with_client(http: Client, policy: RetryPolicy) -> Self {
        Self { http, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `url` and parses the body, using the client's retry policy.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        self.fetch_json_with(url, &self.policy).await
    }

    /// Fetches `url` with at most `max_retries` attempts and the client's backoff.
    pub async fn fetch_json_retrying<T: DeserializeOwned>(
        &self,
        url: &str,
        max_retries: u32,
    ) -> Result<T, FetchError> {
        self.fetch_json_with(url, &self.policy.with_max_attempts(max_retries))
            .await
    }

    /// Fetches `url` under an explicit `policy`.
    ///
    /// A success status returns the parsed body straight away. A 429 with
    /// attempts remaining sleeps for `policy.delay(attempt)` and tries again.
    /// Any other status fails immediately.
    ///
    /// # Errors
    ///
    /// * [`FetchError::RateLimited`] once every attempt has been answered with 429.
    /// * [`FetchError::HttpStatus`] for any other non-success status.
    /// * [`FetchError::Network`] when the request itself could not be completed.
    /// * [`FetchError::Decode`] when the body is not the expected JSON.
    pub async fn fetch_json_with<T: DeserializeOwned>(
        &self,
        url: &str,
        policy: &RetryPolicy,
    ) -> Result<T, FetchError> {
        let max_attempts = policy.max_attempts();
        let mut attempt = 0;

        loop {
            debug!("GET {} (attempt {}/{})", url, attempt + 1, max_attempts);
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Network {
                    url: url.to_string(),
                    source: e,
                })?;

            let status = response.status();
            if status.is_success() {
                let body = response.bytes().await.map_err(|e| FetchError::Network {
                    url: url.to_string(),
                    source: e,
                })?;
                return serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
                    url: url.to_string(),
                    source: e,
                });
            }

            if status != StatusCode::TOO_MANY_REQUESTS {
                warn!("HTTP error for {}: {}", url, status);
                return Err(FetchError::HttpStatus {
                    url: url.to_string(),
                    status,
                });
            }

            if attempt + 1 >= max_attempts {
                warn!("Giving up on {} after {} rate-limited attempts", url, max_attempts);
                return Err(FetchError::RateLimited {
                    url: url.to_string(),
                    attempts: max_attempts,
                });
            }

            let delay = policy.delay(attempt);
            warn!(
                "Rate limited by {} (attempt {}/{}), retrying in {:?}",
                url,
                attempt + 1,
                max_attempts,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Reads and parses a local JSON file.
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, FetchError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| FetchError::File {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
        url: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base: Duration) -> FetchClient {
        FetchClient::new(RetryPolicy::linear(4, base))
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let body: Value = client(Duration::ZERO)
            .fetch_json(&format!("{}/data", server.uri()))
            .await
            .unwrap();
        assert_eq!(body["ok"], 1);
    }

    #[tokio::test]
    async fn test_429_then_200_waits_linear_delay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .expect(1)
            .mount(&server)
            .await;

        let base = Duration::from_millis(300);
        let started = Instant::now();
        let body: Vec<u32> = client(base)
            .fetch_json_retrying(&server.uri(), 4)
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(body, vec![1, 2]);
        // First retry waits base × 1.
        assert!(elapsed >= base, "{elapsed:?}");
        assert!(elapsed < base * 2, "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_second_retry_waits_twice_the_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([3])))
            .expect(1)
            .mount(&server)
            .await;

        let base = Duration::from_millis(200);
        let started = Instant::now();
        let body: Vec<u32> = client(base)
            .fetch_json_retrying(&server.uri(), 4)
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(body, vec![3]);
        // base × 1, then base × 2.
        assert!(elapsed >= base * 3, "{elapsed:?}");
        assert!(elapsed < base * 4, "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_exhausted_retries_report_429() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(4)
            .mount(&server)
            .await;

        let err = client(Duration::from_millis(1))
            .fetch_json::<Value>(&server.uri())
            .await
            .unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
        assert!(err.to_string().contains("try again later"));
        assert_eq!(server.received_requests().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_other_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(Duration::ZERO)
            .fetch_json::<Value>(&server.uri())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(Duration::ZERO)
            .fetch_json::<Value>(&server.uri())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_read_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"a": [1, 2, 3]}"#).unwrap();
        let value: Value = read_json_file(file.path()).await.unwrap();
        assert_eq!(value["a"][2], 3);

        let missing = read_json_file::<Value>(Path::new("/definitely/not/here.json")).await;
        assert!(matches!(missing, Err(FetchError::File { .. })));
    }
}
