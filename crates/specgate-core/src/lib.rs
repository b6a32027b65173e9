pub mod catalog;
pub mod classifier;
pub mod config;
pub mod delegation;
pub mod document;
pub mod error;
pub mod io;
pub mod keyword;
pub mod paths;
pub mod predicate;
pub mod report;
pub mod types;
pub mod validator;

pub use error::{Result, SpecgateError};
