use crate::imports::*;

use super::{PluginKind, PluginProvider, ProviderContext, SharedProvider, unknown_plugin};

/*
    Types:
    * MappedProvider - Publishes a delegate's plugins under external names

    The rename table is built by matching the url of each external PluginInfo against the delegate's
    catalogue, mappings whose url the delegate does not publish are dropped.

    Modes:
    * pass-through (`new`) - unmapped delegate plugins stay visible under their own names
    * filtering (`filtering`) - only mapped plugins are visible
*/
pub struct MappedProvider<K: PluginKind> {
    delegate: SharedProvider<K>,
    external_to_internal: HashMap<String, PluginName>,
    internal_to_external: HashMap<String, PluginName>,
    filtering: bool,
    infos: PluginInfoSet,
}

impl<K: PluginKind> std::fmt::Debug for MappedProvider<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedProvider")
            .field("filtering", &self.filtering)
            .field("infos", &self.infos.to_string())
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl<K: PluginKind> MappedProvider<K> {
    pub fn new(delegate: SharedProvider<K>, mappings: &PluginInfoSet) -> Self {
        Self::build(delegate, mappings, false)
    }

    pub fn filtering(delegate: SharedProvider<K>, mappings: &PluginInfoSet) -> Self {
        Self::build(delegate, mappings, true)
    }

    fn build(delegate: SharedProvider<K>, mappings: &PluginInfoSet, filtering: bool) -> Self {
        let mut external_to_internal = HashMap::new();
        let mut internal_to_external = HashMap::new();

        for mapping in mappings {
            match delegate.infos().by_url(mapping.url()) {
                Some(internal) => {
                    external_to_internal
                        .insert(mapping.name().base().to_string(), internal.name().clone());
                    internal_to_external
                        .insert(internal.name().base().to_string(), mapping.name().clone());
                }
                None => {
                    tracing::debug!(
                        kind = K::LABEL,
                        url = %mapping.url(),
                        name = %mapping.name(),
                        "Mapping url not published by delegate"
                    );
                }
            }
        }

        let infos = delegate
            .infos()
            .iter()
            .filter_map(|info| match internal_to_external.get(info.name().base()) {
                Some(external) => Some(info.with_name(external.clone())),
                None if !filtering => Some(info.clone()),
                None => None,
            })
            .collect::<PluginInfoSet>()
            .distinct_names();

        tracing::debug!(
            kind = K::LABEL,
            filtering,
            mapped_count = external_to_internal.len(),
            "Mapped provider"
        );

        MappedProvider {
            delegate,
            external_to_internal,
            internal_to_external,
            filtering,
            infos,
        }
    }

    /// The delegate's name for an external name, with the reversed flag carried over.
    pub fn internal_name(&self, external: &PluginName) -> Option<PluginName> {
        if let Some(internal) = self.external_to_internal.get(external.base()) {
            return Some(internal.reversed_like(external));
        }
        // Renamed plugins are only reachable through their external name.
        if self.filtering || self.internal_to_external.contains_key(external.base()) {
            return None;
        }
        Some(external.clone())
    }
}

impl<K: PluginKind> PluginProvider<K> for MappedProvider<K> {
    fn resolve(
        &self,
        name: &PluginName,
        values: &[SelectorValue],
        context: &ProviderContext,
    ) -> Result<K::Plugin> {
        let Some(internal) = self.internal_name(name) else {
            tracing::debug!(kind = K::LABEL, name = %name, "No mapping for name");
            return Err(unknown_plugin::<K>(name));
        };
        tracing::trace!(kind = K::LABEL, name = %name, internal = %internal, "Mapped name");
        self.delegate.resolve(&internal, values, context)
    }

    fn infos(&self) -> &PluginInfoSet {
        &self.infos
    }
}
