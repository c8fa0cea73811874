use crate::core::rates::{RateSnapshot, RateTable};
use tracing::debug;

/// Last fetched rate table and the Unix time after which it is stale.
///
/// Table and expiry live in one `Option` so they can only be swapped together.
#[derive(Debug, Default)]
pub struct RateCache {
    inner: Option<RateSnapshot>,
}

impl RateCache {
    pub fn new() -> Self {
        Self { inner: None }
    }

    /// True when nothing was fetched yet or `now` reached the expiry.
    pub fn is_stale(&self, now: i64) -> bool {
        match &self.inner {
            Some(snapshot) => now >= snapshot.next_update_unix,
            None => true,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        let rate = self
            .inner
            .as_ref()
            .and_then(|snapshot| snapshot.rates.get(symbol).copied());
        if rate.is_some() {
            debug!("Cache HIT for symbol: {}", symbol);
        } else {
            debug!("Cache MISS for symbol: {}", symbol);
        }
        rate
    }

    pub fn replace(&mut self, rates: RateTable, next_update_unix: i64) {
        debug!(entries = rates.len(), next_update_unix, "Cache REPLACE");
        self.inner = Some(RateSnapshot {
            rates,
            next_update_unix,
        });
    }

    pub fn expiry(&self) -> Option<i64> {
        self.inner.as_ref().map(|snapshot| snapshot.next_update_unix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> RateTable {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_cache_is_stale() {
        let cache = RateCache::new();
        assert!(cache.is_stale(0));
        assert!(cache.expiry().is_none());
        assert!(cache.get("EUR").is_none());
    }

    #[test]
    fn test_staleness_boundary() {
        let mut cache = RateCache::new();
        cache.replace(table(&[("EUR", 0.92)]), 1_000);

        assert!(!cache.is_stale(999));
        // Expiry itself counts as stale
        assert!(cache.is_stale(1_000));
        assert!(cache.is_stale(1_001));
    }

    #[test]
    fn test_replace_swaps_whole_table() {
        let mut cache = RateCache::new();
        cache.replace(table(&[("EUR", 0.92), ("GBP", 0.79)]), 1_000);
        assert_eq!(cache.get("GBP"), Some(0.79));

        cache.replace(table(&[("EUR", 0.95)]), 2_000);
        assert_eq!(cache.get("EUR"), Some(0.95));
        assert!(cache.get("GBP").is_none());
        assert_eq!(cache.expiry(), Some(2_000));
    }
}
