use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::core::constants::{ad_status, error_messages, http_status};

/// An ad as yielded by the enumerator, together with the campaign it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub campaign_name: String,
    pub campaign_id: String,
    pub ad_id: String,
    pub ad_type: String,
    /// Final URL of the creative. Some ad types carry none.
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default = "default_status")]
    pub campaign_status: String,
    #[serde(default = "default_status")]
    pub ad_status: String,
}

fn default_status() -> String {
    ad_status::ENABLED.to_string()
}

impl Ad {
    /// Create an enabled ad in an enabled campaign.
    pub fn new(
        campaign_name: impl Into<String>,
        campaign_id: impl Into<String>,
        ad_id: impl Into<String>,
        ad_type: impl Into<String>,
        destination_url: Option<String>,
    ) -> Self {
        Self {
            campaign_name: campaign_name.into(),
            campaign_id: campaign_id.into(),
            ad_id: ad_id.into(),
            ad_type: ad_type.into(),
            destination_url,
            campaign_status: default_status(),
            ad_status: default_status(),
        }
    }

    /// The destination URL exactly as exported, or `None` when it is absent
    /// or blank.
    pub fn checkable_url(&self) -> Option<&str> {
        self.destination_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Whether both the ad and its campaign are enabled.
    pub fn is_enabled(&self) -> bool {
        self.campaign_status.eq_ignore_ascii_case(ad_status::ENABLED)
            && self.ad_status.eq_ignore_ascii_case(ad_status::ENABLED)
    }
}

/// Outcome status of a URL check: an HTTP status, or the symbolic `ERROR`
/// when the request never produced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Http(u16),
    Error,
}

impl StatusCode {
    pub fn is_ok(&self) -> bool {
        matches!(self, StatusCode::Http(http_status::OK))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatusCode::Http(code) => write!(f, "{code}"),
            StatusCode::Error => write!(f, "{}", error_messages::SYMBOLIC_ERROR_STATUS),
        }
    }
}

// Numeric codes stay numbers in JSON, the symbolic status becomes "ERROR".
impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatusCode::Http(code) => serializer.serialize_u16(*code),
            StatusCode::Error => serializer.serialize_str(error_messages::SYMBOLIC_ERROR_STATUS),
        }
    }
}

/// Classified result of probing one URL. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub is_broken: bool,
    pub status: StatusCode,
    pub error_message: Option<String>,
}

impl CheckResult {
    /// Classify an HTTP status. Anything but exactly 200 is broken.
    pub fn from_status(code: u16) -> Self {
        let status = StatusCode::Http(code);
        if status.is_ok() {
            Self {
                is_broken: false,
                status,
                error_message: None,
            }
        } else {
            Self {
                is_broken: true,
                status,
                error_message: Some(format!("HTTP {code}")),
            }
        }
    }

    /// A request that failed before any status was received.
    pub fn network_fault(description: impl Into<String>) -> Self {
        Self {
            is_broken: true,
            status: StatusCode::Error,
            error_message: Some(description.into()),
        }
    }
}

/// One finding: an ad whose destination URL is broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLinkRecord {
    pub campaign_name: String,
    pub campaign_id: String,
    pub ad_id: String,
    pub ad_type: String,
    pub url: String,
    pub status: StatusCode,
    pub error_message: Option<String>,
    pub was_paused: bool,
}

impl BrokenLinkRecord {
    pub fn new(ad: &Ad, url: &str, check: &CheckResult, was_paused: bool) -> Self {
        Self {
            campaign_name: ad.campaign_name.clone(),
            campaign_id: ad.campaign_id.clone(),
            ad_id: ad.ad_id.clone(),
            ad_type: ad.ad_type.clone(),
            url: url.to_string(),
            status: check.status,
            error_message: check.error_message.clone(),
            was_paused,
        }
    }
}

impl fmt::Display for BrokenLinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} / {} ({})",
            self.status, self.url, self.campaign_name, self.ad_id, self.ad_type
        )?;
        if let Some(ref message) = self.error_message
            && self.status == StatusCode::Error
        {
            write!(f, " - {message}")?;
        }
        if self.was_paused {
            write!(f, " [paused]")?;
        }
        Ok(())
    }
}

/// Summary counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    /// Ads with a non-blank URL that were evaluated
    pub ads_scanned: usize,
    pub broken_found: usize,
    pub paused_count: usize,
    /// Distinct URLs that went over the network
    pub unique_urls_checked: usize,
    pub cache_hits: usize,
}

/// The findings of one run, in enumeration order, plus run metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub checked_at: DateTime<Utc>,
    pub summary: AuditSummary,
    pub records: Vec<BrokenLinkRecord>,
}

impl AuditReport {
    pub fn new(checked_at: DateTime<Utc>) -> Self {
        Self {
            checked_at,
            summary: AuditSummary::default(),
            records: Vec::new(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.records.is_empty()
    }

    /// Compare two reports ignoring when they were produced.
    pub fn same_content(&self, other: &AuditReport) -> bool {
        self.summary == other.summary && self.records == other.records
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn ad_with_url(url: Option<&str>) -> Ad {
        Ad::new("Spring Sale", "111", "222", "RESPONSIVE_SEARCH_AD", url.map(String::from))
    }

    #[test]
    fn test_check_result__when_200__is_not_broken() {
        let result = CheckResult::from_status(200);

        assert!(!result.is_broken);
        assert_eq!(result.status, StatusCode::Http(200));
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn test_check_result__when_other_2xx__is_broken() {
        for code in [201, 204, 301, 302, 404, 500, 999] {
            let result = CheckResult::from_status(code);
            assert!(result.is_broken, "{code} should be broken");
            assert_eq!(result.error_message, Some(format!("HTTP {code}")));
        }
    }

    #[test]
    fn test_check_result__network_fault() {
        let result = CheckResult::network_fault("dns error");

        assert!(result.is_broken);
        assert_eq!(result.status, StatusCode::Error);
        assert_eq!(result.error_message.as_deref(), Some("dns error"));
    }

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::Http(404).to_string(), "404");
        assert_eq!(StatusCode::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_status_code_serialize() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&StatusCode::Http(500))?, "500");
        assert_eq!(serde_json::to_string(&StatusCode::Error)?, "\"ERROR\"");
        Ok(())
    }

    #[test]
    fn test_checkable_url__blank_and_absent() {
        assert_eq!(ad_with_url(None).checkable_url(), None);
        assert_eq!(ad_with_url(Some("")).checkable_url(), None);
        assert_eq!(ad_with_url(Some("   ")).checkable_url(), None);
        assert_eq!(
            ad_with_url(Some("https://x.test/a")).checkable_url(),
            Some("https://x.test/a")
        );
    }

    #[test]
    fn test_checkable_url__keeps_surrounding_whitespace() {
        assert_eq!(
            ad_with_url(Some(" https://x.test/a")).checkable_url(),
            Some(" https://x.test/a")
        );
    }

    #[test]
    fn test_ad_deserialize__defaults_status_to_enabled() -> serde_json::Result<()> {
        let ad: Ad = serde_json::from_str(
            r#"{"campaignName":"C","campaignId":"1","adId":"2","adType":"EXPANDED_TEXT_AD"}"#,
        )?;

        assert_eq!(ad.destination_url, None);
        assert!(ad.is_enabled());
        Ok(())
    }

    #[test]
    fn test_ad_is_enabled__paused_campaign() {
        let mut ad = ad_with_url(Some("https://x.test"));
        ad.campaign_status = "PAUSED".to_string();
        assert!(!ad.is_enabled());

        let mut ad = ad_with_url(Some("https://x.test"));
        ad.ad_status = "enabled".to_string();
        assert!(ad.is_enabled());
    }

    #[test]
    fn test_broken_link_record__to_string() {
        let ad = ad_with_url(Some("https://x.test/a"));
        let record = BrokenLinkRecord::new(
            &ad,
            "https://x.test/a",
            &CheckResult::from_status(404),
            false,
        );
        assert_eq!(
            record.to_string(),
            "404 - https://x.test/a - Spring Sale / 222 (RESPONSIVE_SEARCH_AD)"
        );

        let record = BrokenLinkRecord::new(
            &ad,
            "https://x.test/a",
            &CheckResult::network_fault("operation timed out"),
            true,
        );
        assert_eq!(
            record.to_string(),
            "ERROR - https://x.test/a - Spring Sale / 222 (RESPONSIVE_SEARCH_AD) - operation timed out [paused]"
        );
    }

    #[test]
    fn test_report_same_content_ignores_timestamp() {
        let mut first = AuditReport::new(Utc::now());
        let mut second = AuditReport::new(first.checked_at + chrono::Duration::seconds(60));
        assert!(first.same_content(&second));

        let ad = ad_with_url(Some("https://x.test/a"));
        first.records.push(BrokenLinkRecord::new(
            &ad,
            "https://x.test/a",
            &CheckResult::from_status(500),
            false,
        ));
        assert!(!first.same_content(&second));

        second.records = first.records.clone();
        assert!(first.same_content(&second));
    }
}
