//! Shared native currency price state

use std::sync::{Arc, RwLock};
use tracing::debug;

/// Read/write access to the application wide native currency price.
pub trait PriceState: Send + Sync {
    fn native_price(&self) -> f64;
    fn set_native_price(&self, price: f64);
}

/// Cloneable handle to a single shared price; clones observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct SharedPrice {
    inner: Arc<RwLock<f64>>,
}

impl SharedPrice {
    pub fn new(price: f64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(price)),
        }
    }
}

impl PriceState for SharedPrice {
    fn native_price(&self) -> f64 {
        // A poisoned lock still holds the last written price
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_native_price(&self, price: f64) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        debug!(old = *guard, new = price, "Native price updated");
        *guard = price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let price = SharedPrice::new(1800.0);
        let handle = price.clone();

        handle.set_native_price(1656.0);
        assert_eq!(price.native_price(), 1656.0);
    }
}
