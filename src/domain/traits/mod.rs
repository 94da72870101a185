//! Domain traits - Extension points implemented outside the crate

pub mod bot_definition;

pub use bot_definition::BotDefinition;
