use super::testing::*;
use super::*;
use crate::test_utils::init_tracing;

fn singleton_registry(names: &[&str]) -> (SharedProvider<TestKind>, Vec<Arc<TestPlugin>>) {
    let mut builder = RegistryProvider::<TestKind>::builder();
    let mut plugins = Vec::new();
    for &text in names {
        let plugin = Arc::new(TestPlugin {
            name: text.to_string(),
            values: vec![],
            reversed: false,
        });
        builder = builder.singleton(info(text), plugin.clone()).unwrap();
        plugins.push(plugin);
    }
    (Arc::new(builder.build()), plugins)
}

#[test]
fn alias_resolves_to_same_instance_as_target() {
    init_tracing();

    let (base, plugins) = singleton_registry(&["comparator1", "comparator2"]);
    let provider = AliasesProvider::new(
        base.clone(),
        PluginAliasSet::parse("alias2 comparator2").unwrap(),
    );
    let context = ProviderContext::new();

    let direct = base.resolve(&name("comparator2"), &[], &context).unwrap();
    let aliased = provider.resolve(&name("alias2"), &[], &context).unwrap();
    assert!(Arc::ptr_eq(&direct, &aliased));
    assert!(Arc::ptr_eq(&aliased, &plugins[1]));

    let reversed = provider.resolve(&name("alias2").reversed(), &[], &context).unwrap();
    assert_eq!(*reversed, TestPlugin {
        reversed: true,
        ..(*direct).clone()
    });
}

#[test]
fn filter_over_unpublished_name_constructs_then_fails_lazily() {
    init_tracing();

    let (base, _) = singleton_registry(&["comparator111"]);
    let filter = PluginInfoSet::parse("https://example.com/test/unknown-comparator404 unknown-comparator404")
        .unwrap();
    let provider = FilteredProvider::new(base, filter);

    let err = provider
        .resolve(&name("unknown-comparator404"), &[], &ProviderContext::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown test unknown-comparator404");
}

#[test]
fn selector_resolved_through_whole_chain() {
    init_tracing();

    let provider = ProviderBuilder::new()
        .base(registry(&["text-prefix", "number"]))
        .aliases(PluginAliasSet::parse("starts text-prefix(\"ab\")").unwrap())
        .build()
        .unwrap();
    let context = ProviderContext::new();

    let selector = PluginSelector::parse("text-prefix(\"xy\", 1)").unwrap();
    let plugin = provider.resolve_selector(&selector, &context).unwrap();
    assert_eq!(
        plugin.values,
        vec![SelectorValue::Text("xy".to_string()), SelectorValue::Number(1.0)]
    );

    let selector = PluginSelector::parse("starts-reversed").unwrap();
    let plugin = provider.resolve_selector(&selector, &context).unwrap();
    assert_eq!(plugin.values, vec![SelectorValue::Text("ab".to_string())]);
    assert!(plugin.reversed);
}

#[test]
fn unknown_plugin_from_nested_chain_names_request() {
    let provider = ProviderBuilder::new()
        .base(registry(&["text"]))
        .also(registry(&["number"]))
        .filtered(PluginInfoSet::with([info("text"), info("number")]))
        .aliases(PluginAliasSet::parse("words text").unwrap())
        .build()
        .unwrap();

    let err = provider
        .resolve(&name("date"), &[], &ProviderContext::new())
        .unwrap_err();
    assert_eq!(unknown_name(&err).as_deref(), Some("date"));
    assert!(is_unknown_plugin(&err));
}

#[test]
fn kind_without_reverse_support_reports_it() {
    #[derive(Debug)]
    struct PlainKind;
    impl PluginKind for PlainKind {
        const LABEL: &'static str = "parser";
        type Plugin = Arc<str>;
    }

    let registry = RegistryProvider::<PlainKind>::builder()
        .singleton(info("iso"), Arc::from("iso"))
        .unwrap()
        .build();
    let context = ProviderContext::new();
    assert_eq!(&*registry.resolve(&name("iso"), &[], &context).unwrap(), "iso");

    let err = registry
        .resolve(&name("iso-reversed"), &[], &context)
        .unwrap_err();
    assert_eq!(err.to_string(), "Reversed parser not supported");
}
