//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Properties resource lookup and parsing

pub mod config;
