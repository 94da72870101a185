//! Plugin system for BotMill
//! 
//! Bot definitions are registered with a [`BotDefinitionRegistry`] at
//! startup, then activated by discovery.

pub mod console;
pub mod registry;

pub use console::{ConsoleBot, CONSOLE_BOT};
pub use registry::{BotDefinitionRegistry, Registration, RegistrationKind};

use crate::application::errors::RegistryError;

/// Registry holding the definitions shipped with the `botmill` binary
pub fn builtin_registry() -> Result<BotDefinitionRegistry, RegistryError> {
    let mut registry = BotDefinitionRegistry::new();
    registry.register_with(CONSOLE_BOT, || Ok(ConsoleBot::default()))?;
    Ok(registry)
}
