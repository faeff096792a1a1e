//! Ad enumeration
//!
//! The auditor pulls ads one at a time through [`AdSource`]. Exports from
//! the advertising platform are read either as a JSON array or as JSON
//! lines (one ad per line, streamed).

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::core::error::{AuditError, Result};
use crate::core::types::Ad;
use crate::reporting::logging;

/// Yields ads until exhausted. An `Err` aborts the audit run.
#[async_trait]
pub trait AdSource: Send {
    async fn next_ad(&mut self) -> Result<Option<Ad>>;
}

/// Ads held in memory, yielded in order.
#[derive(Debug, Default)]
pub struct VecAdSource {
    ads: VecDeque<Ad>,
}

impl VecAdSource {
    pub fn new(ads: Vec<Ad>) -> Self {
        Self { ads: ads.into() }
    }
}

#[async_trait]
impl AdSource for VecAdSource {
    async fn next_ad(&mut self) -> Result<Option<Ad>> {
        Ok(self.ads.pop_front())
    }
}

/// Reads a JSON array of ads from a file.
pub struct JsonAdSource;

impl JsonAdSource {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VecAdSource> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AuditError::Enumeration(format!(
                "Could not read ad export '{}': {}",
                path.display(),
                e
            ))
        })?;
        let ads: Vec<Ad> = serde_json::from_str(&content).map_err(|e| {
            AuditError::Enumeration(format!(
                "Invalid JSON in ad export '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(VecAdSource::new(ads))
    }
}

/// Streams ads from a JSON-lines file. A malformed line fails the run at
/// the point it is reached.
pub struct JsonLinesAdSource {
    lines: Lines<BufReader<tokio::fs::File>>,
    line_number: usize,
}

impl JsonLinesAdSource {
    /// Open the export up front so a missing file fails before the run starts.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AuditError::Enumeration(format!(
                "Could not open ad export '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            lines: BufReader::new(tokio::fs::File::from_std(file)).lines(),
            line_number: 0,
        })
    }
}

#[async_trait]
impl AdSource for JsonLinesAdSource {
    async fn next_ad(&mut self) -> Result<Option<Ad>> {
        loop {
            let next = self.lines.next_line().await.map_err(|e| {
                AuditError::Enumeration(format!(
                    "read failed at line {}: {e}",
                    self.line_number + 1
                ))
            })?;
            let Some(line) = next else {
                return Ok(None);
            };
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            let ad = serde_json::from_str(&line).map_err(|e| {
                AuditError::Enumeration(format!("invalid ad at line {}: {e}", self.line_number))
            })?;
            return Ok(Some(ad));
        }
    }
}

/// Passes through only ads that are enabled in enabled campaigns.
pub struct EnabledAds<S> {
    inner: S,
}

impl<S: AdSource> EnabledAds<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: AdSource> AdSource for EnabledAds<S> {
    async fn next_ad(&mut self) -> Result<Option<Ad>> {
        while let Some(ad) = self.inner.next_ad().await? {
            if ad.is_enabled() {
                return Ok(Some(ad));
            }
            logging::log_skipped_ad(&ad.ad_id, "ad or campaign not enabled");
        }
        Ok(None)
    }
}

#[async_trait]
impl AdSource for Box<dyn AdSource> {
    async fn next_ad(&mut self) -> Result<Option<Ad>> {
        self.as_mut().next_ad().await
    }
}

/// Open an ad export, choosing the reader by file extension
/// (`.jsonl`/`.ndjson` are streamed, anything else is a JSON array).
pub fn open_export<P: AsRef<Path>>(path: P, enabled_only: bool) -> Result<Box<dyn AdSource>> {
    let path = path.as_ref();
    let streamed = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    );

    let source: Box<dyn AdSource> = if streamed {
        Box::new(JsonLinesAdSource::from_file(path)?)
    } else {
        Box::new(JsonAdSource::from_file(path)?)
    };

    if enabled_only {
        Ok(Box::new(EnabledAds::new(source)))
    } else {
        Ok(source)
    }
}
