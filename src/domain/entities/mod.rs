//! Domain entities

pub mod configuration;

pub use configuration::Configuration;
