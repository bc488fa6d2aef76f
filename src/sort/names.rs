use crate::imports::*;

use super::parser;

/*
    Types:
    * SortDirection - UP keeps a comparator's natural order, DOWN reverses it
    * ComparatorNameAndDirection - One sort key within a column or row group
    * ColumnOrRowComparatorNames - A column or row and the ordered sort keys applied to it
    * ColumnOrRowComparatorNamesList - A batch of groups, all columns or all rows, each selection once

    Text forms:
    * `A=text,number DOWN`
    * `A=text;B=date DOWN;` (trailing `;` accepted)
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Up,
    Down,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Up => "UP",
            SortDirection::Down => "DOWN",
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text {
            "UP" => Ok(SortDirection::Up),
            "DOWN" => Ok(SortDirection::Down),
            "" => Err(PluginError::invalid_argument("Missing UP/DOWN").into()),
            _ => Err(PluginError::invalid_character(text, 0).into()),
        }
    }

    pub fn is_down(&self) -> bool {
        *self == SortDirection::Down
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SortDirection::parse(s)
    }
}

text_serde!(SortDirection);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparatorNameAndDirection {
    name: PluginName,
    direction: SortDirection,
}

impl ComparatorNameAndDirection {
    pub fn new(name: PluginName, direction: SortDirection) -> Self {
        ComparatorNameAndDirection { name, direction }
    }

    pub fn name(&self) -> &PluginName {
        &self.name
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl From<PluginName> for ComparatorNameAndDirection {
    fn from(name: PluginName) -> Self {
        ComparatorNameAndDirection::new(name, SortDirection::Up)
    }
}

impl std::fmt::Display for ComparatorNameAndDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SortDirection::Up => write!(f, "{}", self.name),
            SortDirection::Down => write!(f, "{} {}", self.name, self.direction),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnOrRowComparatorNames {
    column_or_row: ColumnOrRowReference,
    names: Vec<ComparatorNameAndDirection>,
}

impl ColumnOrRowComparatorNames {
    pub fn with(
        column_or_row: ColumnOrRowReference,
        names: Vec<ComparatorNameAndDirection>,
    ) -> Result<Self> {
        if names.is_empty() {
            return Err(PluginError::invalid_argument("Empty comparator names").into());
        }
        Ok(ColumnOrRowComparatorNames {
            column_or_row,
            names,
        })
    }

    /// A single group, `;` is not accepted here.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse_single(text)
    }

    pub fn column_or_row(&self) -> &ColumnOrRowReference {
        &self.column_or_row
    }

    pub fn names(&self) -> &[ComparatorNameAndDirection] {
        &self.names
    }

    pub fn set_column_or_row(&self, column_or_row: ColumnOrRowReference) -> Self {
        ColumnOrRowComparatorNames {
            column_or_row,
            names: self.names.clone(),
        }
    }

    pub fn set_names(&self, names: Vec<ComparatorNameAndDirection>) -> Result<Self> {
        if names == self.names {
            return Ok(self.clone());
        }
        Self::with(self.column_or_row, names)
    }
}

impl std::fmt::Display for ColumnOrRowComparatorNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.names.iter().map(|n| n.to_string()).collect();
        write!(f, "{}={}", self.column_or_row, names.join(","))
    }
}

impl std::str::FromStr for ColumnOrRowComparatorNames {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ColumnOrRowComparatorNames::parse(s)
    }
}

text_serde!(ColumnOrRowComparatorNames);

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnOrRowComparatorNamesList {
    entries: Vec<ColumnOrRowComparatorNames>,
}

impl ColumnOrRowComparatorNamesList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every group must share the first group's kind, and no column or row may appear twice
    /// whether written relative or `$` absolute. The first violation wins.
    pub fn with(entries: Vec<ColumnOrRowComparatorNames>) -> Result<Self> {
        let mut seen = HashSet::new();
        let expected = entries.first().map(|entry| entry.column_or_row.kind_label());

        for entry in entries.iter() {
            let reference = entry.column_or_row;
            if let Some(expected) = expected {
                if reference.kind_label() != expected {
                    return Err(PluginError::invalid_argument(format!(
                        "Got {} {} expected {}",
                        reference.kind_label(),
                        reference,
                        expected
                    ))
                    .into());
                }
            }
            if !seen.insert(reference.normalized()) {
                return Err(PluginError::invalid_argument(format!(
                    "Duplicate {} {}",
                    reference.kind_label().to_lowercase(),
                    reference
                ))
                .into());
            }
        }

        Ok(ColumnOrRowComparatorNamesList { entries })
    }

    #[tracing::instrument(level = "debug", skip(text), fields(length = text.len()))]
    pub fn parse(text: &str) -> Result<Self> {
        let entries = parser::parse_batch(text)?;
        tracing::debug!(group_count = entries.len(), "Parsed sort groups");
        Self::with(entries)
    }

    pub fn entries(&self) -> &[ColumnOrRowComparatorNames] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnOrRowComparatorNames> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for ColumnOrRowComparatorNamesList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", entries.join(";"))
    }
}

impl std::str::FromStr for ColumnOrRowComparatorNamesList {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ColumnOrRowComparatorNamesList::parse(s)
    }
}

text_serde!(ColumnOrRowComparatorNamesList);

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(text: &str) -> ColumnOrRowReference {
        ColumnOrRowReference::parse(text).unwrap()
    }

    fn message(text: &str) -> String {
        ColumnOrRowComparatorNamesList::parse(text)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn empty_names_rejected() {
        let err = ColumnOrRowComparatorNames::with(reference("A"), vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Empty comparator names");
    }

    #[test]
    fn display_omits_up() {
        let names = ColumnOrRowComparatorNames::with(
            reference("$B"),
            vec![
                PluginName::with("text").unwrap().into(),
                ComparatorNameAndDirection::new(
                    PluginName::with("number").unwrap(),
                    SortDirection::Down,
                ),
            ],
        )
        .unwrap();
        assert_eq!(names.to_string(), "$B=text,number DOWN");
        assert_eq!(ColumnOrRowComparatorNames::parse("$B=text UP,number DOWN").unwrap(), names);
    }

    #[test]
    fn setters_return_new_values() {
        let names = ColumnOrRowComparatorNames::parse("A=text").unwrap();
        let moved = names.set_column_or_row(reference("C"));
        assert_eq!(moved.to_string(), "C=text");
        assert_eq!(names.set_names(names.names().to_vec()).unwrap(), names);
        assert_eq!(
            names.set_names(vec![]).unwrap_err().to_string(),
            "Empty comparator names"
        );
    }

    #[test]
    fn mixed_kinds_rejected() {
        assert_eq!(message("A=text;1=text"), "Got Row 1 expected Column");
        assert_eq!(message("2=text;$B=text"), "Got Column $B expected Row");
    }

    #[test]
    fn duplicates_rejected_with_later_text() {
        assert_eq!(message("A=text;B=text;$A=number"), "Duplicate column $A");
        assert_eq!(message("$A=text;A=number"), "Duplicate column A");
        assert_eq!(message("3=text;3=text"), "Duplicate row 3");
    }

    #[test]
    fn kind_checked_before_duplicate() {
        assert_eq!(message("A=text;A=text;1=text"), "Duplicate column A");
        assert_eq!(message("A=text;1=text;A=text"), "Got Row 1 expected Column");
    }

    #[test]
    fn direction_text() {
        assert_eq!(SortDirection::default(), SortDirection::Up);
        assert_eq!("DOWN".parse::<SortDirection>().unwrap(), SortDirection::Down);
        assert_eq!(SortDirection::parse("").unwrap_err().to_string(), "Missing UP/DOWN");
        assert!(SortDirection::parse("down").is_err());
        assert_eq!(serde_json::to_string(&SortDirection::Down).unwrap(), "\"DOWN\"");
    }

    #[test]
    fn batch_round_trips() {
        for text in ["", "A=text", "A=text,number DOWN;$C=date-time DOWN", "1=text;$2=year"] {
            let list = ColumnOrRowComparatorNamesList::parse(text).unwrap();
            assert_eq!(list.to_string(), text);
            assert_eq!(ColumnOrRowComparatorNamesList::parse(&list.to_string()).unwrap(), list);
        }
        let trailing = ColumnOrRowComparatorNamesList::parse("A=text;B=number;").unwrap();
        assert_eq!(trailing.len(), 2);
        assert_eq!(trailing.to_string(), "A=text;B=number");
    }

    #[test]
    fn json_round_trip() {
        let list = ColumnOrRowComparatorNamesList::parse("A=text;B=number DOWN").unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, "\"A=text;B=number DOWN\"");
        assert_eq!(
            serde_json::from_str::<ColumnOrRowComparatorNamesList>(&json).unwrap(),
            list
        );
        assert!(serde_json::from_str::<ColumnOrRowComparatorNamesList>("\"A=text;A=text\"").is_err());
    }
}
