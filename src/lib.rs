pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod git;
pub mod logging;
pub mod ui;

pub use error::{Result, TagNextError};
