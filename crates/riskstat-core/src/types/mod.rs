//! Core data types for risk analysis.

mod confidence;
mod interval;
mod price;
mod range;
mod returns;

pub use confidence::{ConfidenceLevel, DEFAULT_CONFIDENCE_LEVELS};
pub use interval::Interval;
pub use price::{PricePoint, PriceSeries};
pub use range::DateRange;
pub use returns::ReturnSeries;
