//! Domain layer - Core types with no external dependencies
//! 
//! This layer contains:
//! - Entities: The configuration store
//! - Traits: The bot definition extension point

pub mod entities;
pub mod traits;
