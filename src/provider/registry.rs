use crate::imports::*;

use super::{PluginKind, PluginProvider, ProviderContext, unknown_plugin};

/*
    Types:
    * PluginFactory - Builds an instance from evaluated selector values and the caller's context
    * RegistryProvider - Leaf provider backed by a fixed table of factories keyed by name
    * RegistryBuilder - Collects registrations, rejecting duplicates, then freezes them into a RegistryProvider

    Reversed names are never registered. A request for `x-reversed` runs the factory of `x` and hands
    the instance to PluginKind::reverse.
*/
pub type PluginFactory<K> = Box<
    dyn Fn(&[SelectorValue], &ProviderContext) -> Result<<K as PluginKind>::Plugin> + Send + Sync,
>;

pub struct RegistryProvider<K: PluginKind> {
    factories: HashMap<Arc<str>, PluginFactory<K>>,
    infos: PluginInfoSet,
}

impl<K: PluginKind> std::fmt::Debug for RegistryProvider<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryProvider")
            .field("kind", &K::LABEL)
            .field("infos", &self.infos.to_string())
            .finish()
    }
}

impl<K: PluginKind> RegistryProvider<K> {
    pub fn builder() -> RegistryBuilder<K> {
        RegistryBuilder::new()
    }
}

impl<K: PluginKind> PluginProvider<K> for RegistryProvider<K> {
    fn resolve(
        &self,
        name: &PluginName,
        values: &[SelectorValue],
        context: &ProviderContext,
    ) -> Result<K::Plugin> {
        let Some(factory) = self.factories.get(name.base()) else {
            tracing::debug!(kind = K::LABEL, name = %name, "Registry has no such plugin");
            return Err(unknown_plugin::<K>(name));
        };

        tracing::trace!(kind = K::LABEL, name = %name, value_count = values.len(), "Creating plugin");
        let plugin = factory(values, context)?;
        if name.is_reversed() {
            K::reverse(plugin)
        } else {
            Ok(plugin)
        }
    }

    fn infos(&self) -> &PluginInfoSet {
        &self.infos
    }
}

pub struct RegistryBuilder<K: PluginKind> {
    factories: HashMap<Arc<str>, PluginFactory<K>>,
    infos: Vec<PluginInfo>,
}

impl<K: PluginKind> Default for RegistryBuilder<K> {
    fn default() -> Self {
        RegistryBuilder {
            factories: HashMap::new(),
            infos: Vec::new(),
        }
    }
}

impl<K: PluginKind> RegistryBuilder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, info: PluginInfo, factory: F) -> Result<Self>
    where
        F: Fn(&[SelectorValue], &ProviderContext) -> Result<K::Plugin> + Send + Sync + 'static,
    {
        let name = info.name();
        if name.is_reversed() {
            return Err(PluginError::invalid_argument(format!(
                "Registered {} {} must not be reversed",
                K::LABEL,
                name
            ))
            .into());
        }
        let key: Arc<str> = Arc::from(name.base());
        if self.factories.contains_key(&key) {
            return Err(PluginError::invalid_argument(format!("Duplicate name {}", name)).into());
        }

        self.factories.insert(key, Box::new(factory));
        self.infos.push(info);
        Ok(self)
    }

    /// Registers a value-less plugin that hands out clones of one shared instance.
    pub fn singleton(self, info: PluginInfo, plugin: K::Plugin) -> Result<Self> {
        let label = info.name().to_string();
        self.register(info, move |values, _| {
            if !values.is_empty() {
                return Err(PluginError::invalid_argument(format!(
                    "{} {} expects no values, got {}",
                    K::LABEL,
                    label,
                    join_values(values)
                ))
                .into());
            }
            Ok(plugin.clone())
        })
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn build(self) -> RegistryProvider<K> {
        tracing::debug!(kind = K::LABEL, count = self.infos.len(), "Built plugin registry");
        RegistryProvider {
            factories: self.factories,
            infos: PluginInfoSet::with(self.infos),
        }
    }
}
