use crate::imports::*;

pub mod aliases;
pub mod builder;
pub mod collection;
pub mod context;
pub mod filtered;
pub mod mapped;
pub mod registry;
#[cfg(test)]
pub mod tests;

pub use aliases::AliasesProvider;
pub use builder::{ProviderBuilder, ProviderConfig};
pub use collection::CollectionProvider;
pub use context::ProviderContext;
pub use filtered::FilteredProvider;
pub use mapped::MappedProvider;
pub use registry::{PluginFactory, RegistryBuilder, RegistryProvider};

/*
    Traits:
    * PluginKind - Names a family of plugins (comparators, parsers, ..) and the instance type it produces
    * PluginProvider - Resolves names and selectors of one kind to live instances, and publishes its catalogue

    Types:
    * SharedProvider - The form providers are held in once built, combinators wrap these
*/
pub trait PluginKind: Send + Sync + 'static {
    /// Used in unknown-plugin messages, "Unknown comparator text2".
    const LABEL: &'static str;

    type Plugin: Clone + Send + Sync + 'static;

    /// Produces the reverse-ordering variant of an instance, asked for by a `-reversed` name.
    fn reverse(plugin: Self::Plugin) -> Result<Self::Plugin> {
        let _ = plugin;
        Err(PluginError::invalid_argument(format!("Reversed {} not supported", Self::LABEL)).into())
    }
}

pub trait PluginProvider<K: PluginKind>: Send + Sync + std::fmt::Debug {
    fn resolve(
        &self,
        name: &PluginName,
        values: &[SelectorValue],
        context: &ProviderContext,
    ) -> Result<K::Plugin>;

    fn resolve_selector(
        &self,
        selector: &PluginSelector,
        context: &ProviderContext,
    ) -> Result<K::Plugin> {
        selector.evaluate_value_text::<K, Self>(self, context)
    }

    fn infos(&self) -> &PluginInfoSet;
}

pub type SharedProvider<K> = Arc<dyn PluginProvider<K>>;

pub(crate) fn unknown_plugin<K: PluginKind>(name: &PluginName) -> anyhow::Error {
    PluginError::unknown(K::LABEL, name).into()
}

/// Unknown-plugin failures are the only ones a combinator may swallow while searching.
pub(crate) fn is_unknown_plugin(error: &anyhow::Error) -> bool {
    plugin_error(error).is_some_and(PluginError::is_unknown_plugin)
}
