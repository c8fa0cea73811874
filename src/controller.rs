//! Currency switching: validates a picked symbol, keeps the rate table fresh
//! and republishes the native price converted from its captured USD base.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::core::currency::normalize;
use crate::core::{
    Clock, CurrencySymbol, Notifier, PriceState, RateCache, RateSource, SymbolList, SystemClock,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserError {
    #[error("Invalid currency symbol: {0}")]
    InvalidSymbol(String),

    #[error("Failed to fetch conversion rates: {0}")]
    FetchError(String),
}

/// Outcome of a successful currency switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub symbol: CurrencySymbol,
    pub rate: f64,
    pub base_price: f64,
    pub price: f64,
    /// Whether rates were fetched for this submission.
    pub refreshed: bool,
}

/// One session of currency switching.
///
/// The USD base price is read from the shared price state on the first
/// successful conversion and reused afterwards, so switching back and forth
/// never compounds. Submissions must not overlap; `submit` takes `&mut self`.
pub struct ConversionController {
    symbols: SymbolList,
    source: Arc<dyn RateSource>,
    price_state: Arc<dyn PriceState>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    cache: RateCache,
    base_price: Option<f64>,
}

impl ConversionController {
    pub fn new(
        symbols: SymbolList,
        source: Arc<dyn RateSource>,
        price_state: Arc<dyn PriceState>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            symbols,
            source,
            price_state,
            notifier,
            clock: Arc::new(SystemClock),
            cache: RateCache::new(),
            base_price: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn symbols(&self) -> &SymbolList {
        &self.symbols
    }

    pub fn base_price(&self) -> Option<f64> {
        self.base_price
    }

    /// Switches the published price to `raw_input`'s currency and fires one
    /// notification describing the outcome.
    pub async fn submit(&mut self, raw_input: &str) -> Result<Conversion, UserError> {
        let result = self.convert(raw_input).await;
        match &result {
            Ok(conversion) => self
                .notifier
                .success(&format!("Currency changed to {}", conversion.symbol)),
            Err(UserError::InvalidSymbol(_)) => self.notifier.error("Invalid currency symbol"),
            Err(UserError::FetchError(_)) => {
                self.notifier.error("Failed to fetch conversion rates")
            }
        }
        result
    }

    #[instrument(name = "CurrencySubmit", skip(self))]
    async fn convert(&mut self, raw_input: &str) -> Result<Conversion, UserError> {
        let symbol = self
            .symbols
            .parse(raw_input)
            .ok_or_else(|| UserError::InvalidSymbol(normalize(raw_input)))?;

        let now = self.clock.now_unix();
        let refreshed = self.cache.is_stale(now);
        if refreshed {
            debug!(now, expiry = ?self.cache.expiry(), "Rate cache stale, fetching");
            let snapshot = self
                .source
                .fetch_latest()
                .await
                .map_err(|e| UserError::FetchError(format!("{e:#}")))?;
            self.cache.replace(snapshot.rates, snapshot.next_update_unix);
        }

        let rate = self.cache.get(symbol.as_str()).ok_or_else(|| {
            UserError::FetchError(format!("No rate for {symbol} in fetched table"))
        })?;

        let base_price = match self.base_price {
            Some(price) => price,
            None => {
                let price = self.price_state.native_price();
                debug!(price, "Captured USD base price");
                self.base_price = Some(price);
                price
            }
        };

        let price = base_price * rate;
        self.price_state.set_native_price(price);
        info!(%symbol, rate, base_price, price, refreshed, "Currency changed");

        Ok(Conversion {
            symbol,
            rate,
            base_price,
            price,
            refreshed,
        })
    }
}
