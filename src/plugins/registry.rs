//! Bot definition registry - Plugin modules register constructors here

use std::any::Any;

use crate::application::errors::{BoxError, DiscoveryError, RegistryError};
use crate::domain::traits::BotDefinition;

/// Typed zero-argument constructor
pub type Constructor = Box<dyn Fn() -> Result<Box<dyn BotDefinition>, BoxError> + Send + Sync>;

/// Constructor whose product is only checked when it runs.
/// It must yield a `Box<dyn BotDefinition>` boxed as `dyn Any`.
pub type ErasedConstructor = Box<dyn Fn() -> Result<Box<dyn Any + Send>, BoxError> + Send + Sync>;

/// How a registration gets instantiated
pub enum RegistrationKind {
    /// Shared base that is listed but never constructed
    Abstract,
    Concrete(Constructor),
    Erased(ErasedConstructor),
}

/// A named entry in the registry
pub struct Registration {
    name: String,
    kind: RegistrationKind,
}

impl Registration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, RegistrationKind::Abstract)
    }

    /// Run the constructor
    pub fn instantiate(&self) -> Result<Box<dyn BotDefinition>, DiscoveryError> {
        match &self.kind {
            RegistrationKind::Abstract => Err(DiscoveryError::Instantiation {
                name: self.name.clone(),
                source: "abstract bot definitions cannot be instantiated".into(),
            }),
            RegistrationKind::Concrete(ctor) => ctor().map_err(|source| DiscoveryError::Instantiation {
                name: self.name.clone(),
                source,
            }),
            RegistrationKind::Erased(ctor) => {
                let value = ctor().map_err(|source| DiscoveryError::Instantiation {
                    name: self.name.clone(),
                    source,
                })?;
                value
                    .downcast::<Box<dyn BotDefinition>>()
                    .map(|definition| *definition)
                    .map_err(|_| DiscoveryError::NotABotDefinition {
                        name: self.name.clone(),
                        source: None,
                    })
            }
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            RegistrationKind::Abstract => "abstract",
            RegistrationKind::Concrete(_) => "concrete",
            RegistrationKind::Erased(_) => "erased",
        };
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// Ordered set of bot definition registrations. Names are unique.
#[derive(Debug, Default)]
pub struct BotDefinitionRegistry {
    entries: Vec<Registration>,
}

impl BotDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: String, kind: RegistrationKind) -> Result<(), RegistryError> {
        if self.contains(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        tracing::debug!("Registering bot definition: {}", name);
        self.entries.push(Registration { name, kind });
        Ok(())
    }

    /// Register a default-constructible definition under its type name
    pub fn register<T>(&mut self) -> Result<(), RegistryError>
    where
        T: BotDefinition + Default + 'static,
    {
        self.register_with(std::any::type_name::<T>(), || Ok(T::default()))
    }

    /// Register a definition built by a fallible constructor
    pub fn register_with<F, D>(&mut self, name: impl Into<String>, ctor: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Result<D, BoxError> + Send + Sync + 'static,
        D: BotDefinition + 'static,
    {
        let ctor: Constructor = Box::new(move || ctor().map(|d| Box::new(d) as Box<dyn BotDefinition>));
        self.insert(name.into(), RegistrationKind::Concrete(ctor))
    }

    /// Register a constructor whose product is type-checked at discovery
    pub fn register_erased<F>(&mut self, name: impl Into<String>, ctor: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Result<Box<dyn Any + Send>, BoxError> + Send + Sync + 'static,
    {
        self.insert(name.into(), RegistrationKind::Erased(Box::new(ctor)))
    }

    /// Register a name that discovery lists but never constructs
    pub fn register_abstract(&mut self, name: impl Into<String>) -> Result<(), RegistryError> {
        self.insert(name.into(), RegistrationKind::Abstract)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|r| r.name == name)
    }

    /// Registrations in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.name.as_str()).collect()
    }

    /// Number of registrations discovery would construct
    pub fn concrete_count(&self) -> usize {
        self.entries.iter().filter(|r| !r.is_abstract()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
