use std::collections::HashMap;
use std::sync::Arc;

use super::PortableDataType;
use super::errors::ProviderError;
use super::generator::OnlineAuthDataGenerator;

type ProviderKey = (String, PortableDataType);

/// Read-only table from (service, data type) to the generator handling it.
///
/// Built once at startup through [`ProviderRegistryBuilder`]; there is no way
/// to register or remove entries afterwards.
#[derive(Default)]
pub struct ProviderRegistry {
    generators: HashMap<ProviderKey, Arc<dyn OnlineAuthDataGenerator>>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    pub fn resolve_generator(
        &self,
        service: &str,
        data_type: PortableDataType,
    ) -> Result<Arc<dyn OnlineAuthDataGenerator>, ProviderError> {
        self.generators
            .get(&(service.to_string(), data_type))
            .cloned()
            .ok_or_else(|| ProviderError::Unsupported {
                service: service.to_string(),
                data_type,
            })
    }

    pub fn is_supported(&self, service: &str, data_type: PortableDataType) -> bool {
        self.generators
            .contains_key(&(service.to_string(), data_type))
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

#[derive(Default)]
pub struct ProviderRegistryBuilder {
    generators: HashMap<ProviderKey, Arc<dyn OnlineAuthDataGenerator>>,
}

impl ProviderRegistryBuilder {
    pub fn register(
        mut self,
        service: impl Into<String>,
        data_type: PortableDataType,
        generator: Arc<dyn OnlineAuthDataGenerator>,
    ) -> Self {
        let service = service.into();
        if self
            .generators
            .insert((service.clone(), data_type), generator)
            .is_some()
        {
            tracing::warn!(
                "Replacing generator for service: {}, data type: {}",
                service,
                data_type
            );
        }
        self
    }

    pub fn build(self) -> ProviderRegistry {
        tracing::info!(
            "Provider registry built with {} entries",
            self.generators.len()
        );
        ProviderRegistry {
            generators: self.generators,
        }
    }
}
