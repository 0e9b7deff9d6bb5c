//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod chat_config;

// Re-export repositories
pub use chat_config::ChatConfigRepository;
