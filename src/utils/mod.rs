//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, and duration parsing.

pub mod duration;
pub mod errors;
pub mod logging;

pub use duration::{format_delay, parse_duration};
pub use errors::{Result, SweepBotError};
