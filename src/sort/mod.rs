pub mod comparators;
pub mod names;
mod parser;

pub use comparators::{ColumnOrRowComparators, ColumnOrRowComparatorsList};
pub use names::{
    ColumnOrRowComparatorNames, ColumnOrRowComparatorNamesList, ComparatorNameAndDirection,
    SortDirection,
};
