//! Discovery service - Activates every registered bot definition

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::application::errors::DiscoveryError;
use crate::domain::entities::Configuration;
use crate::plugins::registry::{BotDefinitionRegistry, Registration};

/// What to do when a bot definition fails to activate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscoveryPolicy {
    /// Abort on the first failure
    #[default]
    FailFast,
    /// Keep going and report every failure together
    CollectAll,
}

/// Outcome of a successful discovery run, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub activated: Vec<String>,
    pub skipped_abstract: Vec<String>,
}

pub struct DiscoveryService {
    policy: DiscoveryPolicy,
}

impl DiscoveryService {
    pub fn new(policy: DiscoveryPolicy) -> Self {
        Self { policy }
    }

    /// Construct each concrete registration and call `define_behaviour` on it
    pub fn load_bot_definitions(
        &self,
        registry: &BotDefinitionRegistry,
        config: &Configuration,
    ) -> Result<DiscoveryReport, DiscoveryError> {
        if registry.concrete_count() == 0 {
            warn!("No bot definition found. Make sure to register at least one type implementing BotDefinition.");
        }

        let mut report = DiscoveryReport::default();
        let mut failures = Vec::new();

        for registration in registry.iter() {
            if registration.is_abstract() {
                debug!("Skipping abstract bot definition [{}]", registration.name());
                report.skipped_abstract.push(registration.name().to_string());
                continue;
            }

            match Self::activate(registration, config) {
                Ok(()) => {
                    info!("Activated bot definition [{}]", registration.name());
                    report.activated.push(registration.name().to_string());
                }
                Err(e) => {
                    match std::error::Error::source(&e) {
                        Some(cause) => error!("{}: {}", e, cause),
                        None => error!("{}", e),
                    }
                    match self.policy {
                        DiscoveryPolicy::FailFast => return Err(e),
                        DiscoveryPolicy::CollectAll => failures.push(e),
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(DiscoveryError::Multiple(failures));
        }
        Ok(report)
    }

    fn activate(registration: &Registration, config: &Configuration) -> Result<(), DiscoveryError> {
        let mut definition = registration.instantiate()?;
        definition
            .define_behaviour(config)
            .map_err(|source| DiscoveryError::Instantiation {
                name: registration.name().to_string(),
                source,
            })
    }
}

impl Default for DiscoveryService {
    fn default() -> Self {
        Self::new(DiscoveryPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::BoxError;
    use crate::domain::traits::BotDefinition;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl BotDefinition for Counting {
        fn define_behaviour(&mut self, _config: &Configuration) -> Result<(), BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("handler registration failed".into());
            }
            Ok(())
        }
    }

    fn counting(registry: &mut BotDefinitionRegistry, name: &str, fail: bool) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let shared = calls.clone();
        registry
            .register_with(name, move || Ok(Counting { calls: shared.clone(), fail }))
            .unwrap();
        calls
    }

    #[test]
    fn test_empty_registry_completes() {
        let report = DiscoveryService::default()
            .load_bot_definitions(&BotDefinitionRegistry::new(), &Configuration::new())
            .unwrap();
        assert!(report.activated.is_empty());
        assert!(report.skipped_abstract.is_empty());
    }

    #[test]
    fn test_only_abstract_registrations_complete() {
        let mut registry = BotDefinitionRegistry::new();
        registry.register_abstract("base").unwrap();
        let report = DiscoveryService::default()
            .load_bot_definitions(&registry, &Configuration::new())
            .unwrap();
        assert!(report.activated.is_empty());
        assert_eq!(report.skipped_abstract, vec!["base".to_string()]);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let mut registry = BotDefinitionRegistry::new();
        let first = counting(&mut registry, "first", false);
        let broken = counting(&mut registry, "broken", true);
        let after = counting(&mut registry, "after", false);

        let err = DiscoveryService::new(DiscoveryPolicy::FailFast)
            .load_bot_definitions(&registry, &Configuration::new())
            .unwrap_err();

        assert_eq!(err.name(), Some("broken"));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(broken.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_collect_all_reports_every_failure() {
        let mut registry = BotDefinitionRegistry::new();
        counting(&mut registry, "a", true);
        let ok = counting(&mut registry, "b", false);
        registry
            .register_with("c", || -> Result<Counting, BoxError> { Err("no default constructor".into()) })
            .unwrap();

        let err = DiscoveryService::new(DiscoveryPolicy::CollectAll)
            .load_bot_definitions(&registry, &Configuration::new())
            .unwrap_err();

        assert_eq!(ok.load(Ordering::SeqCst), 1);
        match err {
            DiscoveryError::Multiple(failures) => {
                let names: Vec<_> = failures.iter().filter_map(|f| f.name()).collect();
                assert_eq!(names, vec!["a", "c"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_behaviour_error_is_wrapped() {
        let mut registry = BotDefinitionRegistry::new();
        counting(&mut registry, "broken", true);
        let err = DiscoveryService::default()
            .load_bot_definitions(&registry, &Configuration::new())
            .unwrap_err();

        match &err {
            DiscoveryError::Instantiation { name, source } => {
                assert_eq!(name, "broken");
                assert_eq!(source.to_string(), "handler registration failed");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Configuration error: failed to activate [broken]");
    }
}
