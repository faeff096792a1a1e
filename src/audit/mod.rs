//! The link-validation engine
//!
//! [`Auditor`] walks the ads, [`UrlCache`] keeps each distinct URL to a
//! single [`Probe`] call per run, and [`Remediator`] pauses ads whose
//! destination turned out broken.

pub mod auditor;
pub mod cache;
pub mod probe;
pub mod remediate;

pub use auditor::Auditor;
pub use cache::UrlCache;
pub use probe::{HttpProber, Probe};
pub use remediate::{AdPauser, HttpPauser, Remediator};
