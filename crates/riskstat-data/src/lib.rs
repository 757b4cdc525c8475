//! Price sources for risk analysis.
//!
//! Both sources filter to the requested date range and resample to the
//! requested interval; neither retries or caches.

mod csv_source;
mod memory_source;

pub use csv_source::CsvPriceSource;
pub use memory_source::InMemoryPriceSource;
