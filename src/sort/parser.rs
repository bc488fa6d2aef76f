use crate::imports::*;

use super::names::{ColumnOrRowComparatorNames, ComparatorNameAndDirection, SortDirection};
use crate::plugin::cursor::TextCursor;
use crate::values::reference::parse_column_or_row;

/*
    Scanner for the sort key text:

    batch     := entry (';' entry)* ';'?
    entry     := selection '=' key (',' key)*
    key       := name (whitespace+ ('UP' | 'DOWN'))?
    selection := '$'? letters | '$'? digits

    Whitespace is only accepted between a name and its direction. Positions in InvalidCharacter
    errors index the whole batch text.
*/

pub(crate) fn parse_batch(text: &str) -> Result<Vec<ColumnOrRowComparatorNames>> {
    let mut cursor = TextCursor::new(text);
    let mut entries = Vec::new();

    while !cursor.is_end() {
        entries.push(parse_entry(&mut cursor)?);
        match cursor.peek() {
            None => break,
            Some(';') => {
                cursor.advance();
            }
            Some(_) => return Err(cursor.invalid_character()),
        }
    }
    Ok(entries)
}

pub(crate) fn parse_single(text: &str) -> Result<ColumnOrRowComparatorNames> {
    let mut cursor = TextCursor::new(text);
    let entry = parse_entry(&mut cursor)?;
    if !cursor.is_end() {
        return Err(cursor.invalid_character());
    }
    Ok(entry)
}

fn at_entry_end(cursor: &TextCursor<'_>) -> bool {
    cursor.is_end() || cursor.peek_is(';')
}

fn parse_entry(cursor: &mut TextCursor<'_>) -> Result<ColumnOrRowComparatorNames> {
    if at_entry_end(cursor) || cursor.peek_is('=') {
        return Err(PluginError::invalid_argument("Missing column/row").into());
    }
    let column_or_row = parse_column_or_row(cursor)?;

    if at_entry_end(cursor) {
        return Err(PluginError::invalid_argument("Missing '='").into());
    }
    if !cursor.peek_is('=') {
        return Err(cursor.invalid_character());
    }
    cursor.advance();

    let mut names = Vec::new();
    loop {
        names.push(parse_key(cursor)?);
        if cursor.peek_is(',') {
            cursor.advance();
            continue;
        }
        if at_entry_end(cursor) {
            break;
        }
        return Err(cursor.invalid_character());
    }

    ColumnOrRowComparatorNames::with(column_or_row, names)
}

fn parse_key(cursor: &mut TextCursor<'_>) -> Result<ComparatorNameAndDirection> {
    if at_entry_end(cursor) || cursor.peek_is(',') {
        return Err(PluginError::invalid_argument("Missing comparator name").into());
    }
    let name = cursor.name()?;

    if cursor.skip_whitespace() == 0 {
        return Ok(ComparatorNameAndDirection::new(name, SortDirection::Up));
    }
    if at_entry_end(cursor) || cursor.peek_is(',') {
        return Err(PluginError::invalid_argument("Missing UP/DOWN").into());
    }

    let start = cursor.position();
    let token = cursor.take_while(|c| c.is_ascii_alphabetic());
    let direction = match token.as_str() {
        "UP" => SortDirection::Up,
        "DOWN" => SortDirection::Down,
        _ => return Err(cursor.invalid_character_at(start)),
    };
    Ok(ComparatorNameAndDirection::new(name, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(text: &str) -> PluginError {
        parse_batch(text)
            .unwrap_err()
            .downcast_ref::<PluginError>()
            .unwrap()
            .clone()
    }

    fn invalid(text: &str, position: usize) -> PluginError {
        PluginError::invalid_character(text, position)
    }

    #[test]
    fn empty_text_has_no_entries() {
        assert!(parse_batch("").unwrap().is_empty());
    }

    #[test]
    fn several_keys_and_directions() {
        let entries = parse_batch("A=day-of-month,month-of-year DOWN;$B=text  UP").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].names().len(), 2);
        assert_eq!(entries[0].names()[1].direction(), SortDirection::Down);
        assert_eq!(entries[1].column_or_row().to_string(), "$B");
        assert_eq!(entries[1].names()[0].direction(), SortDirection::Up);
    }

    #[test]
    fn named_failures() {
        assert_eq!(error("A"), PluginError::invalid_argument("Missing '='"));
        assert_eq!(error("A=text;B"), PluginError::invalid_argument("Missing '='"));
        assert_eq!(error("A="), PluginError::invalid_argument("Missing comparator name"));
        assert_eq!(error("A=text,"), PluginError::invalid_argument("Missing comparator name"));
        assert_eq!(error("A=text,;"), PluginError::invalid_argument("Missing comparator name"));
        assert_eq!(error("A=text "), PluginError::invalid_argument("Missing UP/DOWN"));
        assert_eq!(error("A=text ,number"), PluginError::invalid_argument("Missing UP/DOWN"));
        assert_eq!(error("=text"), PluginError::invalid_argument("Missing column/row"));
        assert_eq!(error(";"), PluginError::invalid_argument("Missing column/row"));
        assert_eq!(error("A=text;;"), PluginError::invalid_argument("Missing column/row"));
    }

    #[test]
    fn invalid_characters_are_positioned() {
        assert_eq!(error("A!=text"), invalid("A!=text", 1));
        assert_eq!(error("A=te!xt"), invalid("A=te!xt", 4));
        assert_eq!(error("A=1text"), invalid("A=1text", 2));
        assert_eq!(error("A=text up"), invalid("A=text up", 7));
        assert_eq!(error("A=text DOWNWARDS"), invalid("A=text DOWNWARDS", 7));
        assert_eq!(error("A=text DOWN!"), invalid("A=text DOWN!", 11));
        assert_eq!(error("A=text; B=text"), invalid("A=text; B=text", 7));
        assert_eq!(error("A1=text"), invalid("A1=text", 1));
    }

    #[test]
    fn out_of_range_selection() {
        assert_eq!(
            error("XFE=text"),
            PluginError::invalid_argument("Invalid column XFE > XFD")
        );
        assert_eq!(error("0=text"), PluginError::invalid_argument("Invalid row 0"));
    }

    #[test]
    fn single_entry_rejects_separator() {
        assert_eq!(
            parse_single("A=text;").unwrap_err().downcast_ref::<PluginError>(),
            Some(&invalid("A=text;", 6))
        );
        assert!(parse_single("A=text").is_ok());
    }
}
