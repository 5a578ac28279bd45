//! HTTP client with rate limiting for the TVRage feed service
//!
//! This module provides a rate-limited HTTP client that keeps request
//! pressure off the feed service and implements retry logic with
//! exponential backoff. Retry policy lives entirely here; the entity layer
//! never retries on its own.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, TvRageError};

/// Base URL for the TVRage feed service
const TVRAGE_BASE_URL: &str = "http://services.tvrage.com";

/// Default User-Agent for feed requests
const DEFAULT_USER_AGENT: &str = "tvrage-core/0.1 (+https://github.com/example/tvrage-client)";

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use tvrage_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request, waiting if necessary to keep
    /// the minimum interval between requests.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            let wait_time = self.min_interval - elapsed;
            sleep(wait_time).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the TVRage HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the feed service (default: `http://services.tvrage.com`)
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TVRAGE_BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the TVRage feeds with rate limiting and retry logic
///
/// This client automatically:
/// - Limits request rate to avoid server overload
/// - Retries on transient errors (429, 5xx) with exponential backoff
pub struct TvRageClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Base URL requests are resolved against
    base_url: String,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl TvRageClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = RateLimiter::new(config.requests_per_second);

        Ok(Self {
            client,
            base_url: config.base_url,
            rate_limiter,
        })
    }

    /// Fetch a feed document from a TVRage path.
    ///
    /// This method handles rate limiting and retries automatically.
    ///
    /// # Arguments
    /// * `path` - Relative path on the feed service
    ///   (e.g., "/feeds/showinfo.php?sid=2930")
    ///
    /// # Returns
    /// The response body as a string
    ///
    /// # Errors
    /// - `TvRageError::Transport` - Network or HTTP error after all retries
    /// - `TvRageError::RateLimited` - Server returned 429 after all retries
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        self.fetch_with_retry(&url, 0).await
    }

    /// Internal method to fetch with retry logic
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            // Wait for rate limiter before making request
            self.rate_limiter.acquire().await;

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            // Handle 429 - Rate Limited
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt < MAX_RETRIES {
                    let delay = self.calculate_backoff_delay(attempt);
                    sleep(delay).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                return Err(TvRageError::RateLimited);
            }

            // Handle 5xx - Server errors
            if status.is_server_error() && attempt < MAX_RETRIES {
                let delay = self.calculate_backoff_delay(attempt);
                sleep(delay).await;
                return self.fetch_with_retry(url, attempt + 1).await;
            }

            // Everything else surfaces as a transport error
            Err(TvRageError::Transport(
                response.error_for_status().unwrap_err(),
            ))
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: 1s, 2s, 4s, ...
        let delay_ms = BASE_RETRY_DELAY_MS * 2u64.pow(attempt);
        Duration::from_millis(delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_different_rates() {
        let limiter = RateLimiter::new(1.0);
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));

        let limiter = RateLimiter::new(4.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://services.tvrage.com");
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        let client = TvRageClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9000".to_string(),
            requests_per_second: 1.0,
            timeout_secs: 60,
        };
        let client = TvRageClient::with_config(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = TvRageClient::new().unwrap();

        assert_eq!(client.calculate_backoff_delay(0), Duration::from_millis(1000));
        assert_eq!(client.calculate_backoff_delay(1), Duration::from_millis(2000));
        assert_eq!(client.calculate_backoff_delay(2), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0); // 10 requests per second = 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least 100ms
        assert!(elapsed >= Duration::from_millis(100));
    }
}
