//! HTTP client abstraction for testability

use thiserror::Error;

/// Errors from a single HTTP attempt.
///
/// Both variants are transient from the fetcher's point of view; the
/// distinction only affects what gets logged.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// The request did not complete within the attempt deadline.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Status and body of a completed HTTP exchange.
///
/// Non-2xx responses are returned in-band rather than as errors so the
/// caller can branch on specific status codes (429 triggers an extended
/// backoff, other failures retry immediately).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for async HTTP GET operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request, reading the full response body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response status and body, or an error if the exchange could not
    /// complete at all.
    fn get(&self, url: &str) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Real HTTP client implementation using reqwest.
///
/// The per-attempt time bound is enforced as a deadline on the client
/// rather than by racing the request future, so a timed-out request is
/// cancelled instead of leaking.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the given per-request timeout.
    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_err)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_err)?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_err(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Transport(e.to_string())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock HTTP client serving a scripted sequence of responses.
    ///
    /// Each `get` consumes the next scripted entry; once the script runs
    /// out, the last entry repeats. A call counter records how many
    /// requests were actually issued.
    pub struct MockHttpClient {
        script: Mutex<Vec<Result<HttpResponse, HttpError>>>,
        calls: AtomicUsize,
    }

    impl MockHttpClient {
        /// Creates a mock that replays the given responses in order.
        pub fn with_script(script: Vec<Result<HttpResponse, HttpError>>) -> Self {
            assert!(!script.is_empty(), "mock script must not be empty");
            let mut script = script;
            script.reverse();
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        /// Creates a mock that always returns the same response.
        pub fn always(response: Result<HttpResponse, HttpError>) -> Self {
            Self::with_script(vec![response])
        }

        /// Shorthand for a response with the given status and body.
        pub fn response(status: u16, body: &[u8]) -> Result<HttpResponse, HttpError> {
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        }

        /// Number of `get` calls issued so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop().unwrap()
            } else {
                script[0].clone()
            }
        }
    }

    #[tokio::test]
    async fn test_mock_client_replays_script() {
        let mock = MockHttpClient::with_script(vec![
            MockHttpClient::response(500, b""),
            MockHttpClient::response(200, b"ok"),
        ]);

        assert_eq!(mock.get("http://example.com").await.unwrap().status, 500);
        assert_eq!(mock.get("http://example.com").await.unwrap().status, 200);
        // Script exhausted: last entry repeats.
        assert_eq!(mock.get("http://example.com").await.unwrap().status, 200);
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockHttpClient::always(Err(HttpError::Transport(
            "connection refused".to_string(),
        )));

        let result = mock.get("http://example.com").await;
        assert!(matches!(result, Err(HttpError::Transport(_))));
    }

    #[test]
    fn test_response_success_predicate() {
        let ok = HttpResponse {
            status: 200,
            body: vec![],
        };
        let rate_limited = HttpResponse {
            status: 429,
            body: vec![],
        };
        assert!(ok.is_success());
        assert!(!rate_limited.is_success());
    }
}
