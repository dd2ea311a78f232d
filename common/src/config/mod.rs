mod manager;
mod provider;
mod serializer;

pub use manager::ConfigManager;
pub use provider::{ConfigContentProvider, FileContentConfigProvider, InMemoryConfigProvider};
pub use serializer::{ConfigSerializer, YamlConfigSerializer};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
