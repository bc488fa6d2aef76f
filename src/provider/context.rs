/*
    ProviderContext carries host objects (locale, clocks, converters, ..) down to plugin factories
    without the providers having to know about them. It is a type-indexed map, one value per type,
    cheap to clone because every value sits behind an Arc.
*/

use crate::imports::*;
use std::any::{Any, TypeId};

#[derive(Clone, Default)]
pub struct ProviderContext {
    map: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderContext")
            .field("keys", &self.map.keys().collect::<Vec<&TypeId>>())
            .finish()
    }
}

impl ProviderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Send + Sync + 'static>(mut self, val: T) -> Self {
        self.insert(val);
        self
    }

    pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) {
        self.map.insert(TypeId::of::<T>(), Arc::new(val));
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map.get(&TypeId::of::<T>())?.downcast_ref()
    }

    /// Like `get` but fails with a NullArgument naming the missing type, for factories that
    /// cannot work without it.
    pub fn require<T: Send + Sync + 'static>(&self) -> Result<&T> {
        self.get::<T>()
            .ok_or_else(|| PluginError::NullArgument(std::any::type_name::<T>()).into())
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Locale(&'static str);

    #[test]
    fn values_are_indexed_by_type() {
        let context = ProviderContext::new().with(Locale("en-AU")).with(42u32);
        assert_eq!(context.get::<Locale>(), Some(&Locale("en-AU")));
        assert_eq!(context.get::<u32>(), Some(&42));
        assert_eq!(context.get::<String>(), None);
    }

    #[test]
    fn later_insert_replaces() {
        let mut context = ProviderContext::new();
        context.insert(Locale("en-AU"));
        context.insert(Locale("fr-FR"));
        assert_eq!(context.get::<Locale>(), Some(&Locale("fr-FR")));
    }

    #[test]
    fn require_reports_missing_type() {
        let context = ProviderContext::new();
        let err = context.require::<Locale>().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PluginError>(),
            Some(PluginError::NullArgument(_))
        ));
        assert!(context.is_empty());
    }
}
