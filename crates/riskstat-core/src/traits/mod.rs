//! Core traits for risk analysis.

mod price_source;

pub use price_source::PriceSource;
