use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::config::Config;
use crate::core::constants::timeouts;
use crate::core::error::{AuditError, Result};
use crate::core::types::CheckResult;

/// A single health check of one URL.
///
/// Implementations never fail: network faults are folded into the returned
/// `CheckResult` as the symbolic `ERROR` status.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> CheckResult;
}

/// Probes URLs with one GET request each, following redirects and
/// accepting invalid certificates on landing pages.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn from_config(config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(Policy::limited(timeouts::MAX_REDIRECTS))
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true);

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                AuditError::Config(format!("Invalid proxy URL '{proxy_url}': {e}"))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        Ok(Self {
            client: client_builder.build()?,
        })
    }

    /// Description of a failed request, preferring the underlying cause.
    fn describe_error(err: &reqwest::Error) -> String {
        std::error::Error::source(err)
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string())
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> CheckResult {
        match self.client.get(url).send().await {
            Ok(response) => CheckResult::from_status(response.status().as_u16()),
            Err(err) => CheckResult::network_fault(Self::describe_error(&err)),
        }
    }
}
