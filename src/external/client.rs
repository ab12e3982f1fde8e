use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance shared by outbound API calls.
///
/// The client is initialized lazily on first access and reused across the
/// application, so connection pooling and DNS caching amortize over every
/// mail dispatch.
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// let response = HTTP_CLIENT
///     .post("https://api.resend.com/emails")
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Security
        .use_rustls_tls()
        .build()
        .expect("Failed to build HTTP client")
});
