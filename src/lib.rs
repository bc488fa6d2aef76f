#[macro_use]
mod text_serde;

mod comparator;
mod error;
mod plugin;
mod provider;
mod sort;
mod values;

#[cfg(test)]
mod test_utils;

// Library exports
pub mod prelude {
    // Errors
    pub use crate::error::{PluginError, plugin_error};

    // Names, selectors and catalogues
    pub use crate::plugin::{
        AliasEntry, AliasTarget, DEFAULT_NAME_POLICY, NamePolicy, PluginAliasSet, PluginInfo,
        PluginInfoSet, PluginName, PluginSelector, REVERSED_SUFFIX, SelectorValue,
    };

    // Providers
    pub use crate::provider::{
        AliasesProvider, CollectionProvider, FilteredProvider, MappedProvider, PluginFactory,
        PluginKind, PluginProvider, ProviderBuilder, ProviderConfig, ProviderContext,
        RegistryBuilder, RegistryProvider, SharedProvider,
    };

    // Spreadsheet values
    pub use crate::values::{
        CellReference, ColumnOrRowReference, ColumnReference, DefaultConverter, ReferenceKind,
        RowReference, SortRecord, SpreadsheetCell, SpreadsheetCells, SpreadsheetValue,
        ValueConverter, ValueType,
    };

    // Comparators
    pub use crate::comparator::{
        BUILTIN_COMPARATOR_URL, ComparatorKind, ReversedComparator, SharedComparator,
        SpreadsheetComparator, builtin_comparators, compare_values, reverse_comparator,
    };

    // Sorting
    pub use crate::sort::{
        ColumnOrRowComparatorNames, ColumnOrRowComparatorNamesList, ColumnOrRowComparators,
        ColumnOrRowComparatorsList, ComparatorNameAndDirection, SortDirection,
    };
}

// Internal imports for use within the crate
#[allow(unused_imports)]
pub(crate) mod imports {
    // Core types
    pub use crate::error::{PluginError, plugin_error};
    pub use crate::plugin::{
        AliasEntry, AliasTarget, PluginAliasSet, PluginInfo, PluginInfoSet, PluginName,
        PluginSelector, SelectorValue, join_values,
    };
    pub use crate::provider::{
        PluginKind, PluginProvider, ProviderBuilder, ProviderConfig, ProviderContext,
        RegistryProvider, SharedProvider,
    };
    pub use crate::values::{
        CellReference, ColumnOrRowReference, DefaultConverter, SortRecord, SpreadsheetCell,
        SpreadsheetCells, SpreadsheetValue, ValueConverter, ValueType,
    };
    pub use crate::comparator::{
        ComparatorKind, SharedComparator, SpreadsheetComparator, builtin_comparators,
        compare_values,
    };

    // Result and error handling
    pub type Result<T> = anyhow::Result<T>;
    pub use anyhow::Context as _;

    // Collections
    pub use std::collections::{HashMap, HashSet};

    // Shared ownership
    pub use std::sync::Arc;

    // Lazy initialization
    pub use std::sync::LazyLock;

    // Urls
    pub use url::Url;
}
