pub mod constants;
pub mod progress;
pub mod projection;

pub use constants::*;
pub use progress::ProgressReporter;
pub use projection::{AlbersUsa, ClipExtent};
