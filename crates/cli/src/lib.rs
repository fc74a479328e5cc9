//! The workshop episodes, runnable from the command line.

pub mod cli;
pub mod episodes;

pub use cli::{Cli, Episode};
