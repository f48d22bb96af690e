//! Command implementations for the CLI
//!
//! - start: Start the site server
//! - test: Test configuration validity
//! - config: Configuration display
//! - quote: Price a selection from the terminal

pub mod config;
pub mod quote;
pub mod start;
pub mod test;
