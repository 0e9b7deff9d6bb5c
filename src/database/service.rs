//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{ChatConfigRepository, DatabasePool};

#[derive(Clone)]
pub struct DatabaseService {
    pub chat_configs: ChatConfigRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            chat_configs: ChatConfigRepository::new(pool),
        }
    }
}
