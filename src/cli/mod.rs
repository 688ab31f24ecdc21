pub mod args;
pub mod commands;
pub mod logging;

pub use args::{Cli, Commands, StateSelection};
pub use commands::run;
