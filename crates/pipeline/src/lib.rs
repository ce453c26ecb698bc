pub mod runner;

pub use runner::{DirectoryFold, Pipeline, RunOutcome};
