//! Startup sequence - Owns the configuration and activates bot definitions

use crate::application::errors::DiscoveryError;
use crate::application::services::discovery_service::{DiscoveryPolicy, DiscoveryReport, DiscoveryService};
use crate::domain::entities::Configuration;
use crate::infrastructure::config::ConfigLoader;
use crate::plugins::registry::BotDefinitionRegistry;

/// Bootstrap context for a BotMill application.
///
/// Holds the configuration loaded at startup and the registry of bot
/// definitions. The configuration is handed to every definition by
/// reference, so nothing here is global.
pub struct BotMill {
    configuration: Configuration,
    loader: ConfigLoader,
    registry: BotDefinitionRegistry,
    discovery: DiscoveryService,
}

impl BotMill {
    pub fn new(loader: ConfigLoader, registry: BotDefinitionRegistry) -> Self {
        Self {
            configuration: Configuration::new(),
            loader,
            registry,
            discovery: DiscoveryService::default(),
        }
    }

    pub fn with_policy(mut self, policy: DiscoveryPolicy) -> Self {
        self.discovery = DiscoveryService::new(policy);
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }

    pub fn loader(&self) -> &ConfigLoader {
        &self.loader
    }

    pub fn registry(&self) -> &BotDefinitionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BotDefinitionRegistry {
        &mut self.registry
    }

    /// Load `botmill.properties`, keeping the current configuration on failure
    pub fn load_configuration_file(&mut self) {
        self.loader.load_configuration_file(&mut self.configuration);
    }

    pub fn load_bot_definitions(&self) -> Result<DiscoveryReport, DiscoveryError> {
        self.discovery.load_bot_definitions(&self.registry, &self.configuration)
    }

    /// Load configuration, then activate bot definitions
    pub fn start(&mut self) -> Result<DiscoveryReport, DiscoveryError> {
        self.load_configuration_file();
        let report = self.load_bot_definitions()?;
        tracing::info!(
            "BotMill started: {} bot definitions activated, {} abstract skipped",
            report.activated.len(),
            report.skipped_abstract.len()
        );
        Ok(report)
    }
}

impl Default for BotMill {
    fn default() -> Self {
        Self::new(ConfigLoader::default(), BotDefinitionRegistry::new())
    }
}
