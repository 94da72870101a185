//! Application layer - Startup use cases
//! 
//! This layer contains:
//! - Services: Configuration loading and bot definition discovery
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
