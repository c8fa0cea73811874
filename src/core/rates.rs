//! Exchange rate abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Symbol to USD conversion factor (units of target currency per USD).
pub type RateTable = HashMap<String, f64>;

/// A full rate table together with the time the provider publishes the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub rates: RateTable,
    pub next_update_unix: i64,
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the latest USD based rate table.
    async fn fetch_latest(&self) -> Result<RateSnapshot>;
}
