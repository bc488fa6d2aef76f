use crate::imports::*;

use super::{SharedComparator, SpreadsheetComparator};
use std::cmp::Ordering;

/// Inverts a comparator. Only ever sees present, converted values so null placement is untouched.
#[derive(Debug, Clone)]
pub struct ReversedComparator {
    inner: SharedComparator,
}

impl ReversedComparator {
    pub fn new(inner: SharedComparator) -> Self {
        ReversedComparator { inner }
    }
}

impl SpreadsheetComparator for ReversedComparator {
    fn name(&self) -> PluginName {
        self.inner.name().reversed()
    }

    fn value_type(&self) -> ValueType {
        self.inner.value_type()
    }

    fn compare(&self, left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
        self.inner.compare(left, right).reverse()
    }

    fn unreversed(&self) -> Option<SharedComparator> {
        Some(self.inner.clone())
    }
}
