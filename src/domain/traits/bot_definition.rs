use crate::application::errors::BoxError;
use crate::domain::entities::Configuration;

/// A pluggable chatbot behaviour module.
///
/// Implementations are constructed once during discovery, asked to define
/// their behaviour (typically by registering handlers with a platform
/// adapter) and then dropped.
pub trait BotDefinition: Send {
    /// Set up the bot's behaviour using the loaded configuration
    fn define_behaviour(&mut self, config: &Configuration) -> Result<(), BoxError>;
}
