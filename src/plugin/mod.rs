pub mod alias;
pub(crate) mod cursor;
pub mod info;
pub mod name;
pub mod selector;
pub mod value;

pub use alias::{AliasEntry, AliasTarget, PluginAliasSet};
pub use info::{PluginInfo, PluginInfoSet};
pub use name::{DEFAULT_NAME_POLICY, NamePolicy, PluginName, REVERSED_SUFFIX};
pub use selector::PluginSelector;
pub use value::{SelectorValue, join_values, parse_value_list};
