//! Application services

pub mod bootstrap;
pub mod discovery_service;

pub use bootstrap::BotMill;
pub use discovery_service::{DiscoveryPolicy, DiscoveryReport, DiscoveryService};
