pub mod prompt;
pub mod setup;
