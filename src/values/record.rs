use crate::imports::*;

/*
    Traits:
    * SortRecord - Something sortable that can answer the value it holds in a column or row

    Types:
    * SpreadsheetCell - One cell, an absent value is an empty cell
    * SpreadsheetCells - The cells of one row (sorted by columns) or one column (sorted by rows)
*/
pub trait SortRecord {
    fn value(&self, selection: &ColumnOrRowReference) -> Option<&SpreadsheetValue>;
}

impl<T: SortRecord + ?Sized> SortRecord for &T {
    fn value(&self, selection: &ColumnOrRowReference) -> Option<&SpreadsheetValue> {
        (**self).value(selection)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetCell {
    reference: CellReference,
    value: Option<SpreadsheetValue>,
}

impl SpreadsheetCell {
    pub fn new(reference: CellReference, value: Option<SpreadsheetValue>) -> Self {
        SpreadsheetCell { reference, value }
    }

    /// `A1=value` or `A1` for an empty cell, the value is interpreted with SpreadsheetValue::parse.
    pub fn parse(text: &str) -> Result<Self> {
        let (reference, value) = match text.split_once('=') {
            Some((reference, value)) => (reference, Some(SpreadsheetValue::parse(value))),
            None => (text, None),
        };
        let reference = CellReference::parse(reference.trim())
            .with_context(|| format!("Invalid cell {:?}", text))?;
        Ok(SpreadsheetCell { reference, value })
    }

    pub fn reference(&self) -> CellReference {
        self.reference
    }

    pub fn cell_value(&self) -> Option<&SpreadsheetValue> {
        self.value.as_ref()
    }
}

impl SortRecord for SpreadsheetCell {
    fn value(&self, selection: &ColumnOrRowReference) -> Option<&SpreadsheetValue> {
        if self.reference.is_within(selection) {
            self.value.as_ref()
        } else {
            None
        }
    }
}

impl std::fmt::Display for SpreadsheetCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.reference, value),
            None => write!(f, "{}", self.reference),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetCells {
    cells: Vec<SpreadsheetCell>,
}

impl SpreadsheetCells {
    pub fn new(cells: Vec<SpreadsheetCell>) -> Self {
        SpreadsheetCells { cells }
    }

    /// Cells separated by `;`, for example `A1=1; B1=x; C1`.
    pub fn parse(text: &str) -> Result<Self> {
        text.split(';')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(SpreadsheetCell::parse)
            .collect::<Result<Vec<_>>>()
            .map(SpreadsheetCells::new)
    }

    pub fn with(mut self, cell: SpreadsheetCell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(&self) -> &[SpreadsheetCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl SortRecord for SpreadsheetCells {
    fn value(&self, selection: &ColumnOrRowReference) -> Option<&SpreadsheetValue> {
        self.cells
            .iter()
            .find(|cell| cell.reference.is_within(selection))
            .and_then(|cell| cell.value.as_ref())
    }
}

impl FromIterator<SpreadsheetCell> for SpreadsheetCells {
    fn from_iter<T: IntoIterator<Item = SpreadsheetCell>>(iter: T) -> Self {
        SpreadsheetCells::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for SpreadsheetCells {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<String> = self.cells.iter().map(|cell| cell.to_string()).collect();
        write!(f, "{}", cells.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(text: &str) -> ColumnOrRowReference {
        ColumnOrRowReference::parse(text).unwrap()
    }

    #[test]
    fn cell_answers_only_its_own_column_and_row() {
        let cell = SpreadsheetCell::parse("B2=1a").unwrap();
        assert_eq!(cell.value(&selection("B")), Some(&SpreadsheetValue::text("1a")));
        assert_eq!(cell.value(&selection("$2")), Some(&SpreadsheetValue::text("1a")));
        assert_eq!(cell.value(&selection("A")), None);
        assert_eq!(cell.to_string(), "B2=1a");
    }

    #[test]
    fn empty_cell_has_no_value() {
        let cell = SpreadsheetCell::parse("A1").unwrap();
        assert_eq!(cell.value(&selection("A")), None);
        assert!(SpreadsheetCell::parse("1A=x").is_err());
    }

    #[test]
    fn row_of_cells() {
        let row = SpreadsheetCells::parse("A3=2022-02-02; B3=5; C3").unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.value(&selection("B")), Some(&SpreadsheetValue::Number(5.0)));
        assert_eq!(row.value(&selection("C")), None);
        assert_eq!(row.value(&selection("D")), None);
        assert_eq!(row.to_string(), "A3=2022-02-02; B3=5; C3");
    }
}
