//! In-memory descriptor registry: the process-wide adapter behind the
//! `DescriptorProvider` port.
//!
//! Descriptors are immutable once registered and handed out as `Arc`s, so
//! concurrent generate calls share them read-only without copying.

use crate::config::Settings;
use crate::domain::{DescriptorProvider, FormDescriptor};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
pub struct DescriptorRegistry {
    descriptors: RwLock<HashMap<String, Arc<FormDescriptor>>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from validated settings, registering every
    /// configured form descriptor.
    pub fn from_settings(settings: &Settings) -> Self {
        let registry = Self::new();
        for descriptor in &settings.forms {
            registry.register(descriptor.clone());
        }
        registry
    }

    /// Register a descriptor under its type name, replacing any previous
    /// registration of the same name.
    pub fn register(&self, descriptor: FormDescriptor) {
        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        descriptors.insert(descriptor.name.clone(), Arc::new(descriptor));
    }

    /// Registered type names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let descriptors = self
            .descriptors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut names: Vec<String> = descriptors.keys().cloned().collect();
        names.sort();
        names
    }
}

impl DescriptorProvider for DescriptorRegistry {
    fn descriptor(&self, name: &str) -> Option<Arc<FormDescriptor>> {
        let descriptors = self
            .descriptors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        descriptors.get(name).cloned()
    }
}
