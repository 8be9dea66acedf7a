//! Shared HTTP client for vendor requests.
//!
//! One `reqwest::Client` is reused across every vendor wrapper so TCP/TLS
//! connections are pooled instead of re-established per call.

use std::time::Duration;

use lazy_static::lazy_static;

lazy_static! {
    static ref SHARED_HTTP_CLIENT: reqwest::Client = reqwest::ClientBuilder::new()
        // Keep idle connections alive for 90 seconds
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .pool_max_idle_per_host(10)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        // LLM completions can be slow; allow long requests
        .timeout(Duration::from_secs(300))
        .build()
        .expect("Failed to build HTTP client");
}

/// Get the shared HTTP client used by every vendor wrapper.
pub fn get_shared_http_client() -> reqwest::Client {
    SHARED_HTTP_CLIENT.clone()
}
