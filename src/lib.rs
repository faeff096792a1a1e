//! Audits ad creatives for dead destination URLs.
//!
//! Ads are pulled from an [`source::AdSource`], each distinct URL is checked
//! once per run, ads pointing at broken URLs can be paused, and the findings
//! are handed to a [`sink::ReportSink`].

pub mod audit;
pub mod config;
pub mod core;
pub mod reporting;
pub mod sink;
pub mod source;
pub mod ui;

pub use crate::audit::{Auditor, Probe, Remediator, UrlCache};
pub use crate::core::{Ad, AuditError, AuditReport, BrokenLinkRecord, CheckResult, Result, StatusCode};
