use crate::imports::*;

use super::cursor::TextCursor;
use super::value::parse_value_list;

/*
    Types:
    * PluginSelector - A PluginName plus the raw argument text that follows it

    The argument text is opaque until evaluated: either a parenthesised value list, stored verbatim
    including the parens, or whitespace separated pattern text, stored trimmed.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginSelector {
    name: PluginName,
    value_text: String,
}

impl PluginSelector {
    pub fn with(name: PluginName, value_text: impl Into<String>) -> Self {
        let value_text = value_text.into();
        PluginSelector {
            name,
            value_text: value_text.trim().to_string(),
        }
    }

    /// Splits on the first whitespace run or first `(`; only the name portion is validated.
    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let name = cursor.name()?;
        match cursor.peek() {
            None | Some('(') => Ok(Self::with(name, cursor.rest())),
            Some(c) if c.is_whitespace() => {
                cursor.skip_whitespace();
                Ok(Self::with(name, cursor.rest()))
            }
            Some(_) => Err(cursor.invalid_character()),
        }
    }

    pub fn name(&self) -> &PluginName {
        &self.name
    }

    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    pub fn with_name(&self, name: PluginName) -> Self {
        PluginSelector {
            name,
            value_text: self.value_text.clone(),
        }
    }

    pub fn with_value_text(&self, value_text: impl Into<String>) -> Self {
        Self::with(self.name.clone(), value_text)
    }

    pub fn reversed(&self) -> Self {
        self.with_name(self.name.reversed())
    }

    /// Re-parses the argument text: nothing, a parenthesised list, or a single pattern text.
    pub fn values(&self) -> Result<Vec<SelectorValue>> {
        if self.value_text.is_empty() {
            Ok(vec![])
        } else if self.value_text.starts_with('(') {
            let offset = self.name.text().chars().count();
            parse_value_list(&self.value_text, &self.to_string(), offset)
        } else {
            Ok(vec![SelectorValue::Text(self.value_text.clone())])
        }
    }

    pub fn evaluate_value_text<K, P>(&self, provider: &P, context: &ProviderContext) -> Result<K::Plugin>
    where
        K: PluginKind,
        P: PluginProvider<K> + ?Sized,
    {
        let values = self.values()?;
        tracing::debug!(
            kind = K::LABEL,
            selector = %self,
            value_count = values.len(),
            "Evaluating selector"
        );
        provider.resolve(&self.name, &values, context)
    }
}

impl std::fmt::Display for PluginSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value_text.is_empty() {
            write!(f, "{}", self.name)
        } else if self.value_text.starts_with('(') {
            write!(f, "{}{}", self.name, self.value_text)
        } else {
            write!(f, "{} {}", self.name, self.value_text)
        }
    }
}

impl std::str::FromStr for PluginSelector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PluginSelector::parse(s)
    }
}

impl From<PluginName> for PluginSelector {
    fn from(name: PluginName) -> Self {
        PluginSelector::with(name, "")
    }
}

text_serde!(PluginSelector);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name() {
        let selector = PluginSelector::parse("text").unwrap();
        assert_eq!(selector.name().text(), "text");
        assert_eq!(selector.value_text(), "");
        assert!(selector.values().unwrap().is_empty());
        assert_eq!(selector.to_string(), "text");
    }

    #[test]
    fn pattern_text_after_whitespace() {
        let selector = PluginSelector::parse("date-format   dd/mm/yyyy ").unwrap();
        assert_eq!(selector.name().text(), "date-format");
        assert_eq!(selector.value_text(), "dd/mm/yyyy");
        assert_eq!(selector.to_string(), "date-format dd/mm/yyyy");
        assert_eq!(
            selector.values().unwrap(),
            vec![SelectorValue::Text("dd/mm/yyyy".to_string())]
        );
    }

    #[test]
    fn parenthesised_arguments() {
        let selector = PluginSelector::parse("text-prefix(\"abc\", 2)").unwrap();
        assert_eq!(selector.value_text(), "(\"abc\", 2)");
        assert_eq!(selector.to_string(), "text-prefix(\"abc\", 2)");
        assert_eq!(
            selector.values().unwrap(),
            vec![
                SelectorValue::Text("abc".to_string()),
                SelectorValue::Number(2.0)
            ]
        );
    }

    #[test]
    fn malformed_name_reports_position() {
        let err = PluginSelector::parse("te!xt(1)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PluginError>().unwrap(),
            &PluginError::invalid_character("te!xt(1)", 2)
        );
    }

    #[test]
    fn malformed_values_positioned_in_selector_text() {
        let selector = PluginSelector::parse("name(1,)").unwrap();
        let err = selector.values().unwrap_err();
        assert_eq!(
            err.downcast_ref::<PluginError>().unwrap(),
            &PluginError::invalid_character("name(1,)", 7)
        );
    }

    #[test]
    fn setters_return_new_values() {
        let selector = PluginSelector::parse("text").unwrap();
        let renamed = selector.with_name(PluginName::with("number").unwrap());
        assert_eq!(renamed.to_string(), "number");
        assert_eq!(selector.with_value_text(""), selector);
        assert_eq!(selector.reversed().to_string(), "text-reversed");
    }

    #[test]
    fn json_round_trip() {
        let selector = PluginSelector::parse("text-prefix(\"a\")").unwrap();
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, "\"text-prefix(\\\"a\\\")\"");
        assert_eq!(serde_json::from_str::<PluginSelector>(&json).unwrap(), selector);
    }
}
