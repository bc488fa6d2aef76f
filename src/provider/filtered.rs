use crate::imports::*;

use super::{PluginKind, PluginProvider, ProviderContext, SharedProvider, unknown_plugin};

/// Restricts a delegate to a whitelist of names. Construction never consults the delegate, names
/// the delegate does not publish simply fail when resolved.
pub struct FilteredProvider<K: PluginKind> {
    delegate: SharedProvider<K>,
    filter: PluginInfoSet,
    infos: PluginInfoSet,
}

impl<K: PluginKind> std::fmt::Debug for FilteredProvider<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredProvider")
            .field("filter", &self.filter.to_string())
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl<K: PluginKind> FilteredProvider<K> {
    pub fn new(delegate: SharedProvider<K>, filter: PluginInfoSet) -> Self {
        let published = delegate.infos();
        let infos = filter.filter(|info| published.contains_name(info.name()));
        tracing::debug!(
            kind = K::LABEL,
            filter_count = filter.len(),
            visible_count = infos.len(),
            "Filtered provider"
        );
        FilteredProvider {
            delegate,
            filter,
            infos,
        }
    }

    pub fn filter(&self) -> &PluginInfoSet {
        &self.filter
    }
}

impl<K: PluginKind> PluginProvider<K> for FilteredProvider<K> {
    fn resolve(
        &self,
        name: &PluginName,
        values: &[SelectorValue],
        context: &ProviderContext,
    ) -> Result<K::Plugin> {
        if !self.filter.contains_name(name) {
            tracing::debug!(kind = K::LABEL, name = %name, "Name filtered out");
            return Err(unknown_plugin::<K>(name));
        }
        self.delegate.resolve(name, values, context)
    }

    fn infos(&self) -> &PluginInfoSet {
        &self.infos
    }
}
