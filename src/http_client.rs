use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, USER_AGENT};

use crate::config::Config;

pub const API_BASE_URL: &str = "https://ballchasing.com/api";

const USER_AGENT_VALUE: &str = "bc-group-export/0.1";

/// Authenticated blocking client for the ballchasing API.
///
/// Transport failures (timeout, connection refused) are retried with linear
/// back-off; HTTP error statuses are returned to the caller immediately.
pub struct ApiClient {
    http: Client,
    token: String,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            token: cfg.token.clone(),
            max_attempts: cfg.max_attempts,
            retry_base_delay: cfg.retry_base_delay,
        })
    }

    /// GET `url` and return the response body. The query is applied only when
    /// non-empty so paginated `next` links can be followed verbatim.
    pub fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let resp = retry_transient(
            url,
            self.max_attempts,
            self.retry_base_delay,
            is_transient,
            || {
                let mut req = self
                    .http
                    .get(url)
                    .header(AUTHORIZATION, self.token.as_str())
                    .header(USER_AGENT, USER_AGENT_VALUE);
                if !query.is_empty() {
                    req = req.query(query);
                }
                req.send()
            },
        )
        .with_context(|| format!("request to {url} failed"))?;

        read_success_body(url, resp)
    }
}

fn read_success_body(url: &str, resp: Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().context("failed reading response body")?;
    if !status.is_success() {
        let snippet = body
            .trim()
            .replace('\n', " ")
            .replace('\r', " ")
            .chars()
            .take(220)
            .collect::<String>();
        return Err(anyhow!("http {} from {}: {}", status, url, snippet));
    }
    Ok(body)
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Run `op` up to `max_attempts` times, sleeping `base_delay * attempt`
/// between attempts. Only errors accepted by `is_transient` are retried;
/// everything else (and exhaustion) returns the underlying error.
pub fn retry_transient<T, E: std::fmt::Display>(
    label: &str,
    max_attempts: u32,
    base_delay: Duration,
    is_transient: impl Fn(&E) -> bool,
    mut op: impl FnMut() -> Result<T, E>,
) -> Result<T, E> {
    let mut attempt = 1u32;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_transient(&err) => {
                let delay = base_delay * attempt;
                log::warn!(
                    "{label}: transient error on attempt {attempt}/{max_attempts}, retrying in {delay:?}: {err}"
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
