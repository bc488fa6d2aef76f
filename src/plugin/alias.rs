use crate::imports::*;

use super::cursor::TextCursor;
use super::info::parse_url;
use super::value::parse_value_list;
use std::collections::BTreeMap;

/*
    Types:
    * AliasTarget - What an alias expands to, another spelling of a name or a parametrised selector
    * AliasEntry - One declaration: a plain name or an alias, optionally published under its own url
    * PluginAliasSet - Ordered, validated set of AliasEntry plus the residual PluginInfoSet

    Grammar:
    * set   := entry (',' entry)*
    * entry := name (target)? (absolute-url)?
    * target:= name | name '(' values ')'

    A token after the alias name is read as a url when it starts with a scheme followed by ':'.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AliasTarget {
    Name(PluginName),
    Selector(PluginSelector),
}

impl AliasTarget {
    pub fn name(&self) -> &PluginName {
        match self {
            AliasTarget::Name(name) => name,
            AliasTarget::Selector(selector) => selector.name(),
        }
    }

    pub fn selector(&self) -> PluginSelector {
        match self {
            AliasTarget::Name(name) => PluginSelector::from(name.clone()),
            AliasTarget::Selector(selector) => selector.clone(),
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            AliasTarget::Name(name) => AliasTarget::Name(name.reversed()),
            AliasTarget::Selector(selector) => AliasTarget::Selector(selector.reversed()),
        }
    }
}

impl std::fmt::Display for AliasTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasTarget::Name(name) => write!(f, "{}", name),
            AliasTarget::Selector(selector) => write!(f, "{}", selector),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasEntry {
    name: PluginName,
    target: Option<AliasTarget>,
    url: Option<Url>,
}

impl AliasEntry {
    pub fn plain(name: PluginName) -> Self {
        AliasEntry {
            name,
            target: None,
            url: None,
        }
    }

    pub fn alias(name: PluginName, target: AliasTarget) -> Self {
        AliasEntry {
            name,
            target: Some(target),
            url: None,
        }
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn entry_name(&self) -> &PluginName {
        &self.name
    }

    pub fn target(&self) -> Option<&AliasTarget> {
        self.target.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn is_alias(&self) -> bool {
        self.target.is_some()
    }

    pub fn info(&self) -> Option<PluginInfo> {
        self.url
            .as_ref()
            .map(|url| PluginInfo::new(url.clone(), self.name.clone()))
    }
}

impl std::fmt::Display for AliasEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(target) = &self.target {
            write!(f, " {}", target)?;
        }
        if let Some(url) = &self.url {
            write!(f, " {}", url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginAliasSet {
    entries: Vec<AliasEntry>,
    index: BTreeMap<String, usize>,
    infos: PluginInfoSet,
}

impl PluginAliasSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates uniqueness, rejects reversed declarations and aliases that point at aliases.
    pub fn with(entries: Vec<AliasEntry>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if entry.name.is_reversed() {
                let what = if entry.is_alias() { "Alias" } else { "Name" };
                return Err(PluginError::invalid_argument(format!(
                    "{} {} must not be reversed",
                    what, entry.name
                ))
                .into());
            }
            if index.insert(entry.name.base().to_string(), i).is_some() {
                return Err(
                    PluginError::invalid_argument(format!("Duplicate name {}", entry.name)).into(),
                );
            }
        }

        for entry in entries.iter() {
            let Some(target) = &entry.target else {
                continue;
            };
            let referred = index.get(target.name().base()).map(|&i| &entries[i]);
            if let Some(other) = referred.filter(|other| other.is_alias()) {
                return Err(PluginError::invalid_argument(format!(
                    "Alias {} refers to alias {}",
                    entry.name, other.name
                ))
                .into());
            }
        }

        let infos = entries.iter().filter_map(AliasEntry::info).collect();
        Ok(PluginAliasSet {
            entries,
            index,
            infos,
        })
    }

    #[tracing::instrument(level = "debug", skip(text), fields(length = text.len()))]
    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let mut entries = Vec::new();

        cursor.skip_whitespace();
        if !cursor.is_end() {
            loop {
                cursor.skip_whitespace();
                if cursor.is_end() {
                    return Err(PluginError::invalid_argument("Missing name").into());
                }
                entries.push(parse_entry(&mut cursor)?);
                cursor.skip_whitespace();
                match cursor.peek() {
                    None => break,
                    Some(',') => {
                        cursor.advance();
                    }
                    Some(_) => return Err(cursor.invalid_character()),
                }
            }
        }

        tracing::debug!(entry_count = entries.len(), "Parsed alias set");
        Self::with(entries)
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, name: &PluginName) -> Option<&AliasEntry> {
        self.index.get(name.base()).map(|&i| &self.entries[i])
    }

    pub fn contains_alias_or_name(&self, name: &PluginName) -> bool {
        self.entry(name).is_some()
    }

    /// Reversal aware: asking for `alias-reversed` answers the reversed target.
    pub fn alias_target(&self, name: &PluginName) -> Option<AliasTarget> {
        let target = self.entry(name)?.target()?;
        Some(if name.is_reversed() {
            target.reversed()
        } else {
            target.clone()
        })
    }

    pub fn alias(&self, name: &PluginName) -> Option<PluginSelector> {
        self.alias_target(name).map(|target| target.selector())
    }

    pub fn aliases(&self) -> impl Iterator<Item = &PluginName> {
        self.entries.iter().filter(|e| e.is_alias()).map(|e| &e.name)
    }

    pub fn names(&self) -> impl Iterator<Item = &PluginName> {
        self.entries.iter().filter(|e| !e.is_alias()).map(|e| &e.name)
    }

    /// Entries declared with their own url.
    pub fn infos(&self) -> &PluginInfoSet {
        &self.infos
    }
}

fn parse_entry(cursor: &mut TextCursor<'_>) -> Result<AliasEntry> {
    let name = cursor.name()?;
    let mut entry = AliasEntry::plain(name);

    if !separated(cursor) {
        return Ok(entry);
    }

    if !looks_like_url(cursor) {
        let target = cursor.name()?;
        entry.target = Some(if cursor.peek_is('(') {
            let start = cursor.position();
            let list = cursor.parenthesised()?;
            parse_value_list(&list, cursor.text(), start)?;
            AliasTarget::Selector(PluginSelector::with(target, list))
        } else {
            AliasTarget::Name(target)
        });

        if !separated(cursor) {
            return Ok(entry);
        }
    }

    let url = cursor.take_while(|c| !c.is_whitespace() && c != ',');
    entry.url = Some(parse_url(&url)?);
    Ok(entry)
}

// Skips whitespace, true when another token of the same entry follows.
fn separated(cursor: &mut TextCursor<'_>) -> bool {
    cursor.skip_whitespace() > 0 && !cursor.is_end() && !cursor.peek_is(',')
}

fn looks_like_url(cursor: &TextCursor<'_>) -> bool {
    let rest = cursor.rest();
    let scheme: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        .collect();
    !scheme.is_empty() && rest[scheme.len()..].starts_with(':')
}

impl std::fmt::Display for PluginAliasSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", entries.join(", "))
    }
}

impl std::str::FromStr for PluginAliasSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PluginAliasSet::parse(s)
    }
}

text_serde!(PluginAliasSet);
