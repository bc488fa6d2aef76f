use crate::imports::*;

use super::cursor::TextCursor;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "plugin/selector.pest"] // relative to src directory
struct SelectorValueParser;

/*
    Types:
    * SelectorValue - One argument of a parenthesised selector value list

    Functions:
    * parse_value_list - Parses `( value, .. )` into SelectorValues, errors are positioned relative to
      the enclosing selector text
*/
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorValue {
    Text(String),
    Number(f64),
    Plugin {
        name: PluginName,
        values: Vec<SelectorValue>,
    },
}

impl SelectorValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SelectorValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SelectorValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl std::fmt::Display for SelectorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorValue::Text(text) => write!(f, "\"{}\"", text.replace('"', "\"\"")),
            SelectorValue::Number(number) => write!(f, "{}", number),
            SelectorValue::Plugin { name, values } => {
                write!(f, "{}", name)?;
                if !values.is_empty() {
                    write!(f, "({})", join_values(values))?;
                }
                Ok(())
            }
        }
    }
}

fn unexpected_end(selector: &str) -> anyhow::Error {
    PluginError::invalid_argument(format!("Unexpected end of text {:?}", selector)).into()
}

pub fn join_values(values: &[SelectorValue]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `list` must start with `(`; `offset` is the character index of `list` within `selector`.
pub fn parse_value_list(list: &str, selector: &str, offset: usize) -> Result<Vec<SelectorValue>> {
    // pest reports an unclosed list at the last token, not at the end.
    if TextCursor::new(list).parenthesised().is_err() {
        return Err(unexpected_end(selector));
    }
    let mut pairs = match SelectorValueParser::parse(Rule::arguments, list) {
        Ok(pairs) => pairs,
        Err(e) => {
            let byte = match e.location {
                InputLocation::Pos(pos) => pos,
                InputLocation::Span((start, _)) => start,
            };
            tracing::debug!(selector, byte, "Selector value list failed to parse");
            if byte >= list.len() {
                return Err(unexpected_end(selector));
            }
            let position = offset + list[..byte].chars().count();
            return Err(PluginError::invalid_character(selector, position).into());
        }
    };

    let arguments = pairs
        .next()
        .context("Selector value list produced no arguments")?;
    arguments
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(value_from_pair)
        .collect()
}

fn value_from_pair(pair: Pair<'_, Rule>) -> Result<SelectorValue> {
    match pair.as_rule() {
        Rule::string => {
            let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
            Ok(SelectorValue::Text(inner.replace("\"\"", "\"")))
        }
        Rule::number => {
            let number = pair
                .as_str()
                .parse::<f64>()
                .with_context(|| format!("Invalid number {:?}", pair.as_str()))?;
            Ok(SelectorValue::Number(number))
        }
        Rule::plugin => {
            let mut inner = pair.into_inner();
            let name = inner
                .next()
                .context("Nested selector without a name")?
                .as_str();
            let name = PluginName::with(name)?;
            let values = inner.map(value_from_pair).collect::<Result<Vec<_>>>()?;
            Ok(SelectorValue::Plugin { name, values })
        }
        other => Err(anyhow::anyhow!("Unexpected selector value {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &str) -> Result<Vec<SelectorValue>> {
        parse_value_list(list, list, 0)
    }

    #[test]
    fn empty_list() {
        assert!(parse("()").unwrap().is_empty());
        assert!(parse("( )").unwrap().is_empty());
    }

    #[test]
    fn strings_numbers_and_nested_plugins() {
        let values = parse("(\"abc\", -1.5, 2, inner(\"x\"), bare)").unwrap();
        assert_eq!(
            values,
            vec![
                SelectorValue::Text("abc".to_string()),
                SelectorValue::Number(-1.5),
                SelectorValue::Number(2.0),
                SelectorValue::Plugin {
                    name: PluginName::with("inner").unwrap(),
                    values: vec![SelectorValue::Text("x".to_string())],
                },
                SelectorValue::Plugin {
                    name: PluginName::with("bare").unwrap(),
                    values: vec![],
                },
            ]
        );
    }

    #[test]
    fn doubled_quote_escapes_quote() {
        let values = parse("(\"say \"\"hi\"\"\", \"\")").unwrap();
        assert_eq!(values[0].as_text(), Some("say \"hi\""));
        assert_eq!(values[1].as_text(), Some(""));
    }

    #[test]
    fn display_reparses_to_equal_values() {
        let values = parse("(\"a\"\"b\", 3, outer(1, inner))").unwrap();
        let text = format!("({})", join_values(&values));
        assert_eq!(text, "(\"a\"\"b\", 3, outer(1, inner))");
        assert_eq!(parse(&text).unwrap(), values);
    }

    #[test]
    fn missing_value_after_comma_positioned_in_selector() {
        let err = parse_value_list("(1,)", "name(1,)", 4).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PluginError>().unwrap(),
            &PluginError::invalid_character("name(1,)", 7)
        );
    }

    #[test]
    fn unterminated_list_is_unexpected_end() {
        let err = parse("(1, 2").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected end of text \"(1, 2\"");

        for list in ["(1, inner(2)", "(\"open", "("] {
            let err = parse(list).unwrap_err();
            assert_eq!(err.to_string(), format!("Unexpected end of text {:?}", list));
        }
    }
}
