//! Period aggregation: ranges and navigation, dedup-by-day, expected
//! working days and monthly statistics.

pub mod dedup;
pub mod expected;
pub mod period;
pub mod stats;
