//! Shared HTTP client for async requests.
//!
//! One lazily-built client per process so connections are pooled across
//! commands. Transport defaults only; the caller decides how to surface
//! failures.

use once_cell::sync::Lazy;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub fn get_http_client() -> &'static reqwest::Client {
    &HTTP_CLIENT
}
