use crate::imports::*;

use super::{
    PluginKind, PluginProvider, ProviderContext, SharedProvider, is_unknown_plugin, unknown_plugin,
};

/// Merges several providers into one namespace, earlier providers win.
pub struct CollectionProvider<K: PluginKind> {
    providers: Vec<SharedProvider<K>>,
    infos: PluginInfoSet,
}

impl<K: PluginKind> std::fmt::Debug for CollectionProvider<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionProvider")
            .field("providers", &self.providers)
            .finish()
    }
}

impl<K: PluginKind> CollectionProvider<K> {
    pub fn new(providers: Vec<SharedProvider<K>>) -> Self {
        let infos = providers
            .iter()
            .fold(PluginInfoSet::empty(), |infos, provider| infos.concat(provider.infos()));
        CollectionProvider { providers, infos }
    }

    /// A single provider is returned as is rather than wrapped.
    pub fn with(mut providers: Vec<SharedProvider<K>>) -> Result<SharedProvider<K>> {
        match providers.len() {
            0 => Err(PluginError::NullArgument("provider").into()),
            1 => Ok(providers.remove(0)),
            _ => Ok(Arc::new(Self::new(providers))),
        }
    }

    pub fn providers(&self) -> &[SharedProvider<K>] {
        &self.providers
    }
}

impl<K: PluginKind> PluginProvider<K> for CollectionProvider<K> {
    fn resolve(
        &self,
        name: &PluginName,
        values: &[SelectorValue],
        context: &ProviderContext,
    ) -> Result<K::Plugin> {
        let mut failure = None;
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.resolve(name, values, context) {
                Ok(plugin) => {
                    tracing::trace!(kind = K::LABEL, name = %name, index, "Resolved by collection member");
                    return Ok(plugin);
                }
                Err(e) if is_unknown_plugin(&e) => {}
                Err(e) => {
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }
        Err(failure.unwrap_or_else(|| unknown_plugin::<K>(name)))
    }

    fn infos(&self) -> &PluginInfoSet {
        &self.infos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::*;

    fn failing(text: &str) -> SharedProvider<TestKind> {
        let message = format!("{} is broken", text);
        Arc::new(
            RegistryProvider::<TestKind>::builder()
                .register(info(text), move |_, _| Err(anyhow::anyhow!(message.clone())))
                .unwrap()
                .build(),
        )
    }

    #[test]
    fn first_provider_publishing_name_wins() {
        let collection = CollectionProvider::new(vec![registry(&["a"]), registry(&["a", "b"])]);
        let context = ProviderContext::new();
        assert_eq!(collection.resolve(&name("b"), &[], &context).unwrap().name, "b");
        assert_eq!(collection.infos().len(), 2);
    }

    #[test]
    fn real_failure_reported_over_unknown() {
        let collection = CollectionProvider::new(vec![registry(&["a"]), failing("b")]);
        let err = collection
            .resolve(&name("b"), &[], &ProviderContext::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "b is broken");
    }

    #[test]
    fn all_unknown_reports_requested_name() {
        let collection = CollectionProvider::new(vec![registry(&["a"]), registry(&["b"])]);
        let err = collection
            .resolve(&name("c-reversed"), &[], &ProviderContext::new())
            .unwrap_err();
        assert_eq!(unknown_name(&err).as_deref(), Some("c-reversed"));
    }

    #[test]
    fn single_provider_not_wrapped() {
        let only = registry(&["a"]);
        let collected = CollectionProvider::with(vec![only.clone()]).unwrap();
        assert!(Arc::ptr_eq(&only, &collected));

        let err = CollectionProvider::<TestKind>::with(vec![]).err().unwrap();
        assert_eq!(err.to_string(), "Missing provider");
    }
}
