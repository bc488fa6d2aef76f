pub mod convert;
pub mod record;
pub mod reference;
pub mod value;

pub use convert::{DefaultConverter, ValueConverter};
pub use record::{SortRecord, SpreadsheetCell, SpreadsheetCells};
pub use reference::{
    CellReference, ColumnOrRowReference, ColumnReference, MAX_COLUMN, MAX_ROW, ReferenceKind,
    RowReference,
};
pub use value::{SpreadsheetValue, ValueType};
