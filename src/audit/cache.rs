use rustc_hash::FxHashMap;

use crate::audit::probe::Probe;
use crate::core::types::CheckResult;
use crate::reporting::logging;

/// Per-run memo of check results, keyed by the literal URL string.
///
/// No normalization is applied: `https://x.test/a` and `https://x.test/a/`
/// are distinct keys and each gets probed once.
#[derive(Debug, Default)]
pub struct UrlCache {
    entries: FxHashMap<String, CheckResult>,
    hits: usize,
}

impl UrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored result for `url`, probing it on first sight.
    pub async fn lookup_or_compute<P>(&mut self, url: &str, prober: &P) -> CheckResult
    where
        P: Probe + ?Sized,
    {
        if let Some(cached) = self.entries.get(url) {
            self.hits += 1;
            logging::log_check_result(url, cached, true);
            return cached.clone();
        }

        let result = prober.probe(url).await;
        logging::log_check_result(url, &result, false);
        self.entries.insert(url.to_string(), result.clone());
        result
    }

    pub fn get(&self, url: &str) -> Option<&CheckResult> {
        self.entries.get(url)
    }

    /// Number of distinct URLs probed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that went to the prober; equal to `len()`
    pub fn misses(&self) -> usize {
        self.entries.len()
    }
}
