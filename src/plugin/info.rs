use crate::imports::*;

use super::cursor::TextCursor;
use std::collections::BTreeSet;

/*
    Types:
    * PluginInfo - Publication record pairing an absolute origin url with a PluginName
    * PluginInfoSet - Immutable, name ordered set of PluginInfo, the published catalogue of a provider

    Text forms:
    * PluginInfo    - `<absolute-url> <name>`
    * PluginInfoSet - one PluginInfo per line in name order, parse also accepts `,` separators
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginInfo {
    // Field order drives the derived ordering: by name, then url.
    name: PluginName,
    url: Url,
}

impl PluginInfo {
    pub fn new(url: Url, name: PluginName) -> Self {
        PluginInfo { name, url }
    }

    pub fn name(&self) -> &PluginName {
        &self.name
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn with_name(&self, name: PluginName) -> Self {
        PluginInfo {
            name,
            url: self.url.clone(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let info = parse_info(&mut cursor)?;
        if !cursor.is_end() {
            return Err(cursor.invalid_character());
        }
        Ok(info)
    }
}

pub(crate) fn parse_url(token: &str) -> Result<Url> {
    Url::parse(token).map_err(|e| {
        PluginError::invalid_argument(format!("Invalid url {:?}: {}", token, e)).into()
    })
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_info_separator(c: char) -> bool {
    c == ',' || c == '\n' || c == '\r'
}

// Reads one `<url> <name>` stopping before a separator or the end of text.
fn parse_info(cursor: &mut TextCursor<'_>) -> Result<PluginInfo> {
    let url = cursor.take_while(|c| !c.is_whitespace() && c != ',');
    if url.is_empty() {
        return Err(match cursor.peek() {
            None => PluginError::invalid_argument("Missing url").into(),
            Some(_) => cursor.invalid_character(),
        });
    }
    let url = parse_url(&url)?;

    if cursor.take_while(is_inline_space).is_empty() {
        return Err(match cursor.peek() {
            Some(c) if !is_info_separator(c) => cursor.invalid_character(),
            _ => PluginError::invalid_argument("Missing name").into(),
        });
    }
    let name = cursor.name()?;
    cursor.take_while(is_inline_space);

    match cursor.peek() {
        None => {}
        Some(c) if is_info_separator(c) => {}
        Some(_) => return Err(cursor.invalid_character()),
    }
    Ok(PluginInfo::new(url, name))
}

impl std::fmt::Display for PluginInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.url, self.name)
    }
}

impl std::str::FromStr for PluginInfo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PluginInfo::parse(s)
    }
}

text_serde!(PluginInfo);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PluginInfoSet {
    infos: BTreeSet<PluginInfo>,
}

impl PluginInfoSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(infos: impl IntoIterator<Item = PluginInfo>) -> Self {
        PluginInfoSet {
            infos: infos.into_iter().collect(),
        }
    }

    #[tracing::instrument(level = "trace", skip(text), fields(length = text.len()))]
    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let mut infos = BTreeSet::new();
        loop {
            cursor.take_while(|c| c.is_whitespace() || c == ',');
            if cursor.is_end() {
                break;
            }
            infos.insert(parse_info(&mut cursor)?);
        }
        tracing::trace!(count = infos.len(), "Parsed plugin infos");
        Ok(PluginInfoSet { infos })
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginInfo> {
        self.infos.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &PluginName> {
        self.infos.iter().map(|info| info.name())
    }

    /// Matches on the unreversed name, reversed variants are never published.
    pub fn contains_name(&self, name: &PluginName) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &PluginName) -> Option<&PluginInfo> {
        let base = name.base();
        self.infos.iter().find(|info| info.name().base() == base && !info.name().is_reversed())
    }

    pub fn by_url(&self, url: &Url) -> Option<&PluginInfo> {
        self.infos.iter().find(|info| info.url() == url)
    }

    pub fn concat(&self, other: &PluginInfoSet) -> Self {
        PluginInfoSet {
            infos: self.infos.union(&other.infos).cloned().collect(),
        }
    }

    pub fn filter(&self, mut predicate: impl FnMut(&PluginInfo) -> bool) -> Self {
        PluginInfoSet {
            infos: self.infos.iter().filter(|&info| predicate(info)).cloned().collect(),
        }
    }

    pub fn with_info(&self, info: PluginInfo) -> Self {
        let mut infos = self.infos.clone();
        infos.insert(info);
        PluginInfoSet { infos }
    }

    /// Keeps the first info seen for each name, in iteration order of `self`.
    pub fn distinct_names(&self) -> Self {
        let mut seen = HashSet::new();
        self.filter(|info| seen.insert(info.name().clone()))
    }
}

impl FromIterator<PluginInfo> for PluginInfoSet {
    fn from_iter<T: IntoIterator<Item = PluginInfo>>(iter: T) -> Self {
        PluginInfoSet::with(iter)
    }
}

impl<'a> IntoIterator for &'a PluginInfoSet {
    type Item = &'a PluginInfo;
    type IntoIter = std::collections::btree_set::Iter<'a, PluginInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.infos.iter()
    }
}

impl std::fmt::Display for PluginInfoSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.infos.iter().map(|info| info.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::str::FromStr for PluginInfoSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PluginInfoSet::parse(s)
    }
}

text_serde!(PluginInfoSet);

#[cfg(test)]
mod tests {
    use super::*;

    fn info(url: &str, name: &str) -> PluginInfo {
        PluginInfo::new(Url::parse(url).unwrap(), PluginName::with(name).unwrap())
    }

    #[test]
    fn info_text_round_trip() {
        let parsed = PluginInfo::parse("https://example.com/text text").unwrap();
        assert_eq!(parsed, info("https://example.com/text", "text"));
        assert_eq!(parsed.to_string(), "https://example.com/text text");
    }

    #[test]
    fn relative_url_rejected() {
        let err = PluginInfo::parse("/relative text").unwrap_err();
        assert!(err.to_string().starts_with("Invalid url \"/relative\""));
    }

    #[test]
    fn bad_name_positioned_in_whole_text() {
        let err = PluginInfoSet::parse("https://example.com/a a,\nhttps://example.com/b b!").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PluginError>().unwrap(),
            &PluginError::invalid_character("https://example.com/a a,\nhttps://example.com/b b!", 48)
        );
    }

    #[test]
    fn missing_name_after_url() {
        let err = PluginInfoSet::parse("https://example.com/a\nhttps://example.com/b b").unwrap_err();
        assert_eq!(err.to_string(), "Missing name");
    }

    #[test]
    fn set_is_sorted_by_name_and_accepts_either_separator() {
        let set = PluginInfoSet::parse(
            "https://example.com/z zebra, https://example.com/a apple\n\nhttps://example.com/m mango",
        )
        .unwrap();
        assert_eq!(
            set.to_string(),
            "https://example.com/a apple\nhttps://example.com/m mango\nhttps://example.com/z zebra"
        );
        assert_eq!(PluginInfoSet::parse(&set.to_string()).unwrap(), set);
    }

    #[test]
    fn concat_filter_and_lookup() {
        let left = PluginInfoSet::with([info("https://example.com/a", "a")]);
        let right = PluginInfoSet::with([info("https://example.com/b", "b")]);
        let both = left.concat(&right);
        assert_eq!(both.len(), 2);
        assert!(both.contains_name(&PluginName::with("b").unwrap()));
        assert!(both.contains_name(&PluginName::with("b-reversed").unwrap()));
        assert_eq!(
            both.by_url(&Url::parse("https://example.com/a").unwrap()).unwrap().name().text(),
            "a"
        );

        let only_a = both.filter(|i| i.name().base() == "a");
        assert_eq!(only_a, left);
    }

    #[test]
    fn distinct_names_keeps_first() {
        let set = PluginInfoSet::with([
            info("https://one.example.com/x", "x"),
            info("https://two.example.com/x", "x"),
        ]);
        assert_eq!(set.len(), 2);
        let distinct = set.distinct_names();
        assert_eq!(distinct.len(), 1);
        assert_eq!(distinct.iter().next().unwrap().url().host_str(), Some("one.example.com"));
    }

    #[test]
    fn json_round_trip() {
        let set = PluginInfoSet::with([info("https://example.com/a", "a")]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"https://example.com/a a\"");
        assert_eq!(serde_json::from_str::<PluginInfoSet>(&json).unwrap(), set);
    }
}
