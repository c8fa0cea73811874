//! Core business logic abstractions

pub mod cache;
pub mod clock;
pub mod config;
pub mod currency;
pub mod log;
pub mod notify;
pub mod price;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use clock::{Clock, SystemClock};
pub use currency::{CurrencySymbol, SymbolList};
pub use notify::{ConsoleNotifier, Notifier};
pub use price::{PriceState, SharedPrice};
pub use rates::{RateSnapshot, RateSource, RateTable};
