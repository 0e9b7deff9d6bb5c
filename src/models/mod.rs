//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod chat;

// Re-export commonly used models
pub use chat::{ChatConfig, SenderClass};
