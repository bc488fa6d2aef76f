use crate::imports::*;

use super::{
    AliasesProvider, CollectionProvider, FilteredProvider, MappedProvider, PluginKind,
    SharedProvider,
};

/*
    Types:
    * ProviderConfig - Declarative renames, whitelist and aliases an installation layers over a base provider
    * ProviderBuilder - Composes base providers and the configured layers into one SharedProvider

    Layers always stack in the same order, innermost first:
    collection of bases -> mapping -> filter -> aliases
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProviderConfig {
    /// External names for delegate plugins, matched by url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<PluginInfoSet>,
    /// Hide delegate plugins without an external name.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mappings_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PluginInfoSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<PluginAliasSet>,
}

impl ProviderConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid provider configuration")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialise provider configuration")
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_none() && self.filter.is_none() && self.aliases.is_none()
    }
}

pub struct ProviderBuilder<K: PluginKind> {
    bases: Vec<SharedProvider<K>>,
    config: ProviderConfig,
}

impl<K: PluginKind> Default for ProviderBuilder<K> {
    fn default() -> Self {
        ProviderBuilder {
            bases: Vec::new(),
            config: ProviderConfig::default(),
        }
    }
}

impl<K: PluginKind> ProviderBuilder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any bases added so far.
    pub fn base(mut self, provider: SharedProvider<K>) -> Self {
        self.bases = vec![provider];
        self
    }

    /// Adds another base, consulted after the earlier ones.
    pub fn also(mut self, provider: SharedProvider<K>) -> Self {
        self.bases.push(provider);
        self
    }

    pub fn mapped(mut self, mappings: PluginInfoSet) -> Self {
        self.config.mappings = Some(mappings);
        self.config.mappings_only = false;
        self
    }

    pub fn filter_mapped(mut self, mappings: PluginInfoSet) -> Self {
        self.config.mappings = Some(mappings);
        self.config.mappings_only = true;
        self
    }

    pub fn filtered(mut self, filter: PluginInfoSet) -> Self {
        self.config.filter = Some(filter);
        self
    }

    pub fn aliases(mut self, aliases: PluginAliasSet) -> Self {
        self.config.aliases = Some(aliases);
        self
    }

    /// Layers present in `config` override the ones set so far.
    pub fn config(mut self, config: &ProviderConfig) -> Self {
        if let Some(mappings) = &config.mappings {
            self.config.mappings = Some(mappings.clone());
            self.config.mappings_only = config.mappings_only;
        }
        if let Some(filter) = &config.filter {
            self.config.filter = Some(filter.clone());
        }
        if let Some(aliases) = &config.aliases {
            self.config.aliases = Some(aliases.clone());
        }
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(kind = K::LABEL, bases = self.bases.len()))]
    pub fn build(self) -> Result<SharedProvider<K>> {
        let ProviderBuilder { bases, config } = self;
        let mut provider = CollectionProvider::with(bases)?;

        if let Some(mappings) = &config.mappings {
            provider = if config.mappings_only {
                Arc::new(MappedProvider::filtering(provider, mappings))
            } else {
                Arc::new(MappedProvider::new(provider, mappings))
            };
        }
        if let Some(filter) = config.filter {
            provider = Arc::new(FilteredProvider::new(provider, filter));
        }
        if let Some(aliases) = config.aliases {
            provider = Arc::new(AliasesProvider::new(provider, aliases));
        }

        tracing::debug!(published = provider.infos().len(), "Built provider chain");
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::*;
    use crate::provider::{PluginProvider, ProviderContext};
    use crate::test_utils::init_tracing;

    #[test]
    fn build_without_base_fails() {
        let err = ProviderBuilder::<TestKind>::new().build().err().unwrap();
        assert_eq!(
            err.downcast_ref::<PluginError>(),
            Some(&PluginError::NullArgument("provider"))
        );
    }

    #[test]
    fn bare_base_is_returned_unwrapped() {
        let base = registry(&["text"]);
        let built = ProviderBuilder::new().base(base.clone()).build().unwrap();
        assert!(Arc::ptr_eq(&base, &built));
    }

    #[test]
    fn config_layers_stack_in_order() {
        init_tracing();

        let config = ProviderConfig::from_json(
            r#"{
                "mappings": "https://example.com/test/text string",
                "filter": "https://example.com/test/text string",
                "aliases": "words string-reversed"
            }"#,
        )
        .unwrap();
        let provider = ProviderBuilder::new()
            .base(registry(&["text"]))
            .also(registry(&["number"]))
            .config(&config)
            .build()
            .unwrap();
        let context = ProviderContext::new();

        let plugin = provider.resolve(&name("words"), &[], &context).unwrap();
        assert_eq!(plugin.name, "text");
        assert!(plugin.reversed);

        // visible through the mapping but removed by the filter
        let err = provider.resolve(&name("number"), &[], &context).unwrap_err();
        assert_eq!(unknown_name(&err).as_deref(), Some("number"));
    }

    #[test]
    fn config_json_round_trip() {
        let config = ProviderConfig {
            mappings: Some(PluginInfoSet::with([info("text")])),
            mappings_only: true,
            filter: None,
            aliases: Some(PluginAliasSet::parse("asc text, desc text-reversed").unwrap()),
        };
        let json = config.to_json().unwrap();
        assert!(!json.contains("filter"));
        assert_eq!(ProviderConfig::from_json(&json).unwrap(), config);
        assert!(ProviderConfig::default().is_empty());
    }

    #[test]
    fn config_with_bad_alias_text_fails_with_context() {
        let err = ProviderConfig::from_json(r#"{ "aliases": "a b, b c" }"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid provider configuration");
        assert!(format!("{:#}", err).contains("Alias a refers to alias b"));
    }
}
