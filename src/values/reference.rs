use crate::imports::*;

use crate::plugin::cursor::TextCursor;

/*
    Consts:
    * MAX_COLUMN - Number of addressable columns, A..XFD
    * MAX_ROW - Number of addressable rows

    Types:
    * ReferenceKind - Relative or `$` absolute
    * ColumnReference / RowReference - One column or row, indices are 0-based
    * ColumnOrRowReference - The selection anchoring a sort key group
    * CellReference - A1 style address of a single cell

    Equality keeps the reference kind so text round trips, `normalized()` drops it for callers that
    only care which column or row is meant.
*/
pub const MAX_COLUMN: u32 = 16_384;
pub const MAX_ROW: u32 = 1_048_576;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceKind {
    #[default]
    Relative,
    Absolute,
}

impl ReferenceKind {
    fn prefix(&self) -> &'static str {
        match self {
            ReferenceKind::Relative => "",
            ReferenceKind::Absolute => "$",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnReference {
    index: u32,
    kind: ReferenceKind,
}

impl ColumnReference {
    pub fn new(index: u32, kind: ReferenceKind) -> Result<Self> {
        if index >= MAX_COLUMN {
            return Err(PluginError::invalid_argument(format!(
                "Invalid column {} > {}",
                index + 1,
                MAX_COLUMN
            ))
            .into());
        }
        Ok(ColumnReference { index, kind })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let column = parse_column(&mut cursor)?;
        finish(&cursor)?;
        Ok(column)
    }

    pub fn value(&self) -> u32 {
        self.index
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn with_kind(&self, kind: ReferenceKind) -> Self {
        ColumnReference { kind, ..*self }
    }

    pub fn letters(&self) -> String {
        let mut letters = Vec::new();
        let mut n = self.index + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl std::fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.letters())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowReference {
    index: u32,
    kind: ReferenceKind,
}

impl RowReference {
    pub fn new(index: u32, kind: ReferenceKind) -> Result<Self> {
        if index >= MAX_ROW {
            return Err(PluginError::invalid_argument(format!(
                "Invalid row {} > {}",
                index as u64 + 1,
                MAX_ROW
            ))
            .into());
        }
        Ok(RowReference { index, kind })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let row = parse_row(&mut cursor)?;
        finish(&cursor)?;
        Ok(row)
    }

    pub fn value(&self) -> u32 {
        self.index
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn with_kind(&self, kind: ReferenceKind) -> Self {
        RowReference { kind, ..*self }
    }
}

impl std::fmt::Display for RowReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index as u64 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnOrRowReference {
    Column(ColumnReference),
    Row(RowReference),
}

impl ColumnOrRowReference {
    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let reference = parse_column_or_row(&mut cursor)?;
        finish(&cursor)?;
        Ok(reference)
    }

    pub fn is_column(&self) -> bool {
        matches!(self, ColumnOrRowReference::Column(_))
    }

    pub fn is_row(&self) -> bool {
        matches!(self, ColumnOrRowReference::Row(_))
    }

    /// "Column" or "Row", as used in kind mismatch messages.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ColumnOrRowReference::Column(_) => "Column",
            ColumnOrRowReference::Row(_) => "Row",
        }
    }

    pub fn reference_kind(&self) -> ReferenceKind {
        match self {
            ColumnOrRowReference::Column(column) => column.kind(),
            ColumnOrRowReference::Row(row) => row.kind(),
        }
    }

    pub fn normalized(&self) -> Self {
        match self {
            ColumnOrRowReference::Column(column) => {
                ColumnOrRowReference::Column(column.with_kind(ReferenceKind::Relative))
            }
            ColumnOrRowReference::Row(row) => {
                ColumnOrRowReference::Row(row.with_kind(ReferenceKind::Relative))
            }
        }
    }
}

impl std::fmt::Display for ColumnOrRowReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnOrRowReference::Column(column) => write!(f, "{}", column),
            ColumnOrRowReference::Row(row) => write!(f, "{}", row),
        }
    }
}

impl std::str::FromStr for ColumnOrRowReference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ColumnOrRowReference::parse(s)
    }
}

impl From<ColumnReference> for ColumnOrRowReference {
    fn from(column: ColumnReference) -> Self {
        ColumnOrRowReference::Column(column)
    }
}

impl From<RowReference> for ColumnOrRowReference {
    fn from(row: RowReference) -> Self {
        ColumnOrRowReference::Row(row)
    }
}

text_serde!(ColumnOrRowReference);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellReference {
    column: ColumnReference,
    row: RowReference,
}

impl CellReference {
    pub fn new(column: ColumnReference, row: RowReference) -> Self {
        CellReference { column, row }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut cursor = TextCursor::new(text);
        let column = parse_column(&mut cursor)?;
        let row = parse_row(&mut cursor)?;
        finish(&cursor)?;
        Ok(CellReference { column, row })
    }

    pub fn column(&self) -> ColumnReference {
        self.column
    }

    pub fn row(&self) -> RowReference {
        self.row
    }

    /// True when this cell lies in the selected column or row.
    pub fn is_within(&self, selection: &ColumnOrRowReference) -> bool {
        match selection {
            ColumnOrRowReference::Column(column) => column.value() == self.column.value(),
            ColumnOrRowReference::Row(row) => row.value() == self.row.value(),
        }
    }
}

impl std::fmt::Display for CellReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl std::str::FromStr for CellReference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        CellReference::parse(s)
    }
}

text_serde!(CellReference);

fn finish(cursor: &TextCursor<'_>) -> Result<()> {
    if cursor.is_end() {
        Ok(())
    } else {
        Err(cursor.invalid_character())
    }
}

fn parse_kind(cursor: &mut TextCursor<'_>) -> ReferenceKind {
    if cursor.peek_is('$') {
        cursor.advance();
        ReferenceKind::Absolute
    } else {
        ReferenceKind::Relative
    }
}

pub(crate) fn parse_column(cursor: &mut TextCursor<'_>) -> Result<ColumnReference> {
    let kind = parse_kind(cursor);
    let letters = cursor.take_while(|c| c.is_ascii_alphabetic());
    if letters.is_empty() {
        return Err(cursor.invalid_character());
    }
    column_from_letters(&letters, kind)
}

pub(crate) fn parse_row(cursor: &mut TextCursor<'_>) -> Result<RowReference> {
    let kind = parse_kind(cursor);
    let digits = cursor.take_while(|c| c.is_ascii_digit());
    if digits.is_empty() {
        return Err(cursor.invalid_character());
    }
    row_from_digits(&digits, kind)
}

/// Letters select a column, digits a row, either may carry a leading `$`.
pub(crate) fn parse_column_or_row(cursor: &mut TextCursor<'_>) -> Result<ColumnOrRowReference> {
    let start = cursor.position();
    let kind = parse_kind(cursor);
    match cursor.peek() {
        Some(c) if c.is_ascii_alphabetic() => {
            let letters = cursor.take_while(|c| c.is_ascii_alphabetic());
            column_from_letters(&letters, kind).map(ColumnOrRowReference::Column)
        }
        Some(c) if c.is_ascii_digit() => {
            let digits = cursor.take_while(|c| c.is_ascii_digit());
            row_from_digits(&digits, kind).map(ColumnOrRowReference::Row)
        }
        None if cursor.position() == start => {
            Err(PluginError::invalid_argument("Missing column/row").into())
        }
        _ => Err(cursor.invalid_character()),
    }
}

fn column_from_letters(letters: &str, kind: ReferenceKind) -> Result<ColumnReference> {
    let out_of_range = || -> anyhow::Error {
        PluginError::invalid_argument(format!("Invalid column {} > XFD", letters.to_ascii_uppercase()))
            .into()
    };
    if letters.len() > 3 {
        return Err(out_of_range());
    }
    let number = letters
        .chars()
        .fold(0u32, |n, c| n * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1));
    if number > MAX_COLUMN {
        return Err(out_of_range());
    }
    ColumnReference::new(number - 1, kind)
}

fn row_from_digits(digits: &str, kind: ReferenceKind) -> Result<RowReference> {
    let out_of_range =
        || -> anyhow::Error { PluginError::invalid_argument(format!("Invalid row {}", digits)).into() };
    let number = digits.parse::<u64>().map_err(|_| out_of_range())?;
    if number == 0 || number > MAX_ROW as u64 {
        return Err(out_of_range());
    }
    RowReference::new(number as u32 - 1, kind)
}
