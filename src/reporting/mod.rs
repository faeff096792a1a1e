//! Logging of audit runs
//!
//! Informational events (run start, broken-link discovery, pause attempts,
//! run summary) go through the `log` facade.

pub mod logging;
