use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::core::constants::ad_status;
use crate::core::error::{AuditError, Result};
use crate::core::types::Ad;
use crate::reporting::logging;

/// The platform's mutation API for moving an ad to the paused state.
#[async_trait]
pub trait AdPauser: Send + Sync {
    async fn pause(&self, ad: &Ad) -> Result<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PauseMutation<'a> {
    campaign_id: &'a str,
    ad_id: &'a str,
    status: &'static str,
}

/// Sends pause mutations as JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpPauser {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPauser {
    pub fn new(endpoint: impl Into<String>, config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl AdPauser for HttpPauser {
    async fn pause(&self, ad: &Ad) -> Result<()> {
        let mutation = PauseMutation {
            campaign_id: &ad.campaign_id,
            ad_id: &ad.ad_id,
            status: ad_status::PAUSED,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&mutation)
            .send()
            .await
            .map_err(|e| AuditError::Remediation(format!("pause of ad {} failed: {e}", ad.ad_id)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AuditError::Remediation(format!(
                "pause of ad {} rejected with HTTP {}",
                ad.ad_id,
                status.as_u16()
            )))
        }
    }
}

/// Pauses ads found broken. A failed pause is logged and reported as
/// "not paused"; it never ends the run.
#[derive(Default)]
pub struct Remediator {
    pauser: Option<Box<dyn AdPauser>>,
}

impl Remediator {
    pub fn new(pauser: Box<dyn AdPauser>) -> Self {
        Self {
            pauser: Some(pauser),
        }
    }

    /// A remediator with no mutation capability; every call is a no-op.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Build from configuration: an `HttpPauser` when a pause endpoint is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.pause_endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => {
                Ok(Self::new(Box::new(HttpPauser::new(endpoint, config)?)))
            }
            _ => Ok(Self::disabled()),
        }
    }

    /// Try to pause `ad`. Returns whether the ad ended up paused.
    pub async fn remediate(&self, ad: &Ad, auto_pause_enabled: bool) -> bool {
        if !auto_pause_enabled {
            return false;
        }

        let Some(ref pauser) = self.pauser else {
            logging::log_error(
                &format!("Cannot pause ad {}: no pause capability configured", ad.ad_id),
                None,
            );
            return false;
        };

        logging::log_pause_attempt(&ad.ad_id);
        match pauser.pause(ad).await {
            Ok(()) => {
                logging::log_pause_outcome(&ad.ad_id, Ok(()));
                true
            }
            Err(err) => {
                logging::log_pause_outcome(&ad.ad_id, Err(&err));
                false
            }
        }
    }
}
