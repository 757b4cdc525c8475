//! Core types and traits for return-series risk analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PricePoint, PriceSeries, DateRange, Interval)
//! - Return series derivation and confidence levels
//! - The price source trait implemented by data providers

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DataError, RiskError, RiskResult};
pub use types::*;
pub use traits::*;
