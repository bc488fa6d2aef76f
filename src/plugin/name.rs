use crate::imports::*;
use regex::Regex;

/*
    Consts:
    * REVERSED_SUFFIX - Text suffix marking the reverse-ordering variant of a name

    Types:
    * PluginName - Validated, case-sensitive plugin identifier held as base text plus a reversed flag
    * NamePolicy - Character class and length rules a plugin kind applies to its names
*/
pub const REVERSED_SUFFIX: &str = "-reversed";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginName {
    base: Arc<str>,
    reversed: bool,
}

impl PluginName {
    /// Parses with the default policy, a trailing `-reversed` sets the reversed flag.
    pub fn with(text: &str) -> Result<Self> {
        DEFAULT_NAME_POLICY.parse(text)
    }

    pub fn with_policy(text: &str, policy: &NamePolicy) -> Result<Self> {
        policy.parse(text)
    }

    pub fn text(&self) -> String {
        self.to_string()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn reversed(&self) -> Self {
        PluginName {
            base: self.base.clone(),
            reversed: !self.reversed,
        }
    }

    pub fn unreversed(&self) -> Self {
        PluginName {
            base: self.base.clone(),
            reversed: false,
        }
    }

    /// Applies the reversed flag of `other` on top of this name, used when an alias or mapping
    /// forwards a reversed request to its target.
    pub fn reversed_like(&self, other: &PluginName) -> Self {
        if other.reversed {
            self.reversed()
        } else {
            self.clone()
        }
    }

    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        let suffix = if self.reversed { REVERSED_SUFFIX } else { "" };
        self.base.chars().chain(suffix.chars())
    }
}

impl PartialOrd for PluginName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PluginName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.chars().cmp(other.chars())
    }
}

impl std::fmt::Display for PluginName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)?;
        if self.reversed {
            f.write_str(REVERSED_SUFFIX)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PluginName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PluginName::with(s)
    }
}

text_serde!(PluginName);

pub struct NamePolicy {
    pub kind: &'static str,
    pub max_length: usize,
    pattern: Regex,
}

impl NamePolicy {
    pub fn new(kind: &'static str, max_length: usize) -> Self {
        Self {
            kind,
            max_length,
            pattern: Regex::new(r"^[A-Za-z][A-Za-z0-9-]*").expect("NamePolicy: invalid pattern"),
        }
    }

    /// Checks the character class and length, returning the error for the first violation.
    pub fn validate(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(PluginError::invalid_argument(format!("Empty {} name", self.kind)).into());
        }
        let valid = self.pattern.find(text).map(|m| m.end()).unwrap_or(0);
        if valid < text.len() {
            let position = text[..valid].chars().count();
            return Err(PluginError::invalid_character(text, position).into());
        }
        if text.len() > self.max_length {
            return Err(PluginError::invalid_argument(format!(
                "Invalid {} name length {} > {}",
                self.kind,
                text.len(),
                self.max_length
            ))
            .into());
        }
        Ok(())
    }

    pub fn parse(&self, text: &str) -> Result<PluginName> {
        self.validate(text)?;
        let (base, reversed) = match text.strip_suffix(REVERSED_SUFFIX) {
            Some(base) if !base.is_empty() => (base, true),
            _ => (text, false),
        };
        // One representation per text, so equality and ordering agree.
        if base.ends_with(REVERSED_SUFFIX) {
            return Err(PluginError::invalid_argument(format!(
                "Invalid {} name {} reversed more than once",
                self.kind, text
            ))
            .into());
        }
        Ok(PluginName {
            base: Arc::from(base),
            reversed,
        })
    }
}

pub static DEFAULT_NAME_POLICY: LazyLock<NamePolicy> = LazyLock::new(|| NamePolicy::new("plugin", 255));
