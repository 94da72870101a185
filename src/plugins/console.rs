//! Console bot definition - Local development bot shipped with the binary

use crate::application::errors::BoxError;
use crate::domain::entities::Configuration;
use crate::domain::traits::BotDefinition;

/// Name the console definition is registered under
pub const CONSOLE_BOT: &str = "console";

/// Reads `bot.name` (required) and `bot.prefix` (default `/`)
#[derive(Debug, Default)]
pub struct ConsoleBot {
    name: Option<String>,
    prefix: Option<String>,
}

impl ConsoleBot {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl BotDefinition for ConsoleBot {
    fn define_behaviour(&mut self, config: &Configuration) -> Result<(), BoxError> {
        let name = config
            .get("bot.name")
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or("missing required property 'bot.name'")?;

        let prefix = config.get_or("bot.prefix", "/").trim();
        if prefix.is_empty() {
            return Err("property 'bot.prefix' must not be empty".into());
        }

        tracing::info!("Console bot '{}' ready, command prefix '{}'", name, prefix);
        self.name = Some(name.to_string());
        self.prefix = Some(prefix.to_string());
        Ok(())
    }
}
