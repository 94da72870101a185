//! Configuration loading
//!
//! Locates `botmill.properties` on the resource search path and parses it
//! into a [`Configuration`].

pub mod properties;

use std::path::{Path, PathBuf};

use crate::application::errors::ConfigError;
use crate::domain::entities::Configuration;

pub use properties::to_properties_string;

/// Name of the properties resource holding the platform configuration
pub const CONFIG_PATH: &str = "botmill.properties";

/// Environment variable listing extra resource directories
pub const RESOURCE_PATH_ENV: &str = "BOTMILL_RESOURCE_PATH";

/// Ordered list of directories searched for resources. First hit wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSearchPath {
    dirs: Vec<PathBuf>,
}

impl ResourceSearchPath {
    /// An empty search path
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories from `BOTMILL_RESOURCE_PATH`, then `.` and `./resources`
    pub fn from_env() -> Self {
        let mut path = Self::new();
        if let Some(value) = std::env::var_os(RESOURCE_PATH_ENV) {
            for dir in std::env::split_paths(&value) {
                if !dir.as_os_str().is_empty() {
                    path.dirs.push(dir);
                }
            }
        }
        path.with_dir(".").with_dir("resources")
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    /// Search `dir` before everything already on the path
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.insert(0, dir.into());
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find the first directory containing `name`
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

/// Loads the properties resource from a search path
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_path: ResourceSearchPath,
    resource_name: String,
}

impl ConfigLoader {
    pub fn new(search_path: ResourceSearchPath) -> Self {
        Self {
            search_path,
            resource_name: CONFIG_PATH.to_string(),
        }
    }

    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    pub fn search_path(&self) -> &ResourceSearchPath {
        &self.search_path
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Read and parse the resource, reporting why it failed
    pub fn try_load(&self) -> Result<Configuration, ConfigError> {
        let path = self
            .search_path
            .locate(&self.resource_name)
            .ok_or_else(|| ConfigError::NotFound(self.resource_name.clone()))?;
        Self::load_file(&path)
    }

    /// Read and parse a properties file at an explicit path
    pub fn load_file(path: &Path) -> Result<Configuration, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = properties::parse(&properties::decode(&bytes))?;
        tracing::debug!("Parsed {} entries from {}", config.len(), path.display());
        Ok(config)
    }

    /// Replace `config` with the loaded resource.
    ///
    /// Failures are logged and leave `config` untouched.
    pub fn load_configuration_file(&self, config: &mut Configuration) {
        match self.try_load() {
            Ok(loaded) => {
                tracing::info!(
                    "Loaded BotMill properties file ({}) with {} entries",
                    self.resource_name,
                    loaded.len()
                );
                *config = loaded;
            }
            Err(e) => {
                tracing::error!(
                    "Error while loading BotMill properties file ({}): {}",
                    self.resource_name,
                    e
                );
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(ResourceSearchPath::from_env())
    }
}
