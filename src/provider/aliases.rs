use crate::imports::*;

use super::{PluginKind, PluginProvider, ProviderContext, SharedProvider, unknown_plugin};

/*
    Types:
    * AliasesProvider - Resolves the aliases of a PluginAliasSet before delegating

    Resolution order for a requested name:
    1. a declared alias, reversal aware. Selector targets are complete so the caller's values are
       dropped, bare name targets receive them.
    2. a name the delegate publishes, passed through unchanged.
    3. otherwise unknown.

    Published infos are the set's own url entries, then delegate infos for declared plain names and
    alias targets under the declared name. The first info for a name wins.
*/
pub struct AliasesProvider<K: PluginKind> {
    delegate: SharedProvider<K>,
    aliases: PluginAliasSet,
    infos: PluginInfoSet,
}

impl<K: PluginKind> std::fmt::Debug for AliasesProvider<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasesProvider")
            .field("aliases", &self.aliases.to_string())
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl<K: PluginKind> AliasesProvider<K> {
    pub fn new(delegate: SharedProvider<K>, aliases: PluginAliasSet) -> Self {
        let residual = aliases.infos();
        let published = delegate.infos();

        let renamed = aliases
            .entries()
            .iter()
            .filter(|entry| entry.url().is_none() && !residual.contains_name(entry.entry_name()))
            .filter_map(|entry| {
                let target = entry
                    .target()
                    .map(|target| target.name())
                    .unwrap_or_else(|| entry.entry_name());
                published
                    .get(target)
                    .map(|info| info.with_name(entry.entry_name().clone()))
            })
            .collect::<PluginInfoSet>()
            .distinct_names();
        let infos = residual.concat(&renamed);

        tracing::debug!(
            kind = K::LABEL,
            alias_count = aliases.aliases().count(),
            published_count = infos.len(),
            "Aliases provider"
        );

        AliasesProvider {
            delegate,
            aliases,
            infos,
        }
    }

    pub fn aliases(&self) -> &PluginAliasSet {
        &self.aliases
    }
}

impl<K: PluginKind> PluginProvider<K> for AliasesProvider<K> {
    #[tracing::instrument(level = "trace", skip_all, fields(kind = K::LABEL, name = %name))]
    fn resolve(
        &self,
        name: &PluginName,
        values: &[SelectorValue],
        context: &ProviderContext,
    ) -> Result<K::Plugin> {
        if let Some(target) = self.aliases.alias_target(name) {
            tracing::trace!(target = %target, "Resolving alias");
            return match target {
                AliasTarget::Selector(selector) => self.delegate.resolve_selector(&selector, context),
                AliasTarget::Name(target) => self.delegate.resolve(&target, values, context),
            };
        }

        if self.delegate.infos().contains_name(name) {
            return self.delegate.resolve(name, values, context);
        }

        tracing::debug!("Neither an alias nor a delegate name");
        Err(unknown_plugin::<K>(name))
    }

    fn infos(&self) -> &PluginInfoSet {
        &self.infos
    }
}
