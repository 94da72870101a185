//! BotMill bootstrap
//!
//! Loads `botmill.properties` from the resource search path and activates
//! every registered [`BotDefinition`].
//!
//! ```no_run
//! use botmill::{BotDefinition, BotMill, BoxError, Configuration};
//!
//! #[derive(Default)]
//! struct EchoBot;
//!
//! impl BotDefinition for EchoBot {
//!     fn define_behaviour(&mut self, config: &Configuration) -> Result<(), BoxError> {
//!         tracing::info!("echo bot token: {:?}", config.get("telegram.token"));
//!         Ok(())
//!     }
//! }
//!
//! let mut botmill = BotMill::default();
//! botmill.registry_mut().register::<EchoBot>()?;
//! botmill.start()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;

pub use application::errors::{BoxError, ConfigError, DiscoveryError, RegistryError};
pub use application::services::{BotMill, DiscoveryPolicy, DiscoveryReport, DiscoveryService};
pub use domain::entities::Configuration;
pub use domain::traits::BotDefinition;
pub use infrastructure::config::{ConfigLoader, ResourceSearchPath, CONFIG_PATH};
pub use plugins::BotDefinitionRegistry;
