pub mod reading;
pub mod station;

pub use reading::{NormalizedReading, Reading, ReadingBuilder};
pub use station::StationSummary;
