use crate::imports::*;

use std::cmp::Ordering;

pub mod builtin;
pub mod reversed;

pub use builtin::{BUILTIN_COMPARATOR_URL, builtin_comparators};
pub use reversed::ReversedComparator;

/*
    Traits:
    * SpreadsheetComparator - Orders two present values already converted to value_type()

    Types:
    * SharedComparator - How comparators are handed out by providers
    * ComparatorKind - PluginKind for comparators, reversal wraps in a ReversedComparator

    Functions:
    * compare_values - Applies the null and conversion policy around a comparator
*/
pub trait SpreadsheetComparator: Send + Sync + std::fmt::Debug {
    fn name(&self) -> PluginName;

    fn value_type(&self) -> ValueType;

    fn compare(&self, left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering;

    /// The wrapped comparator when this one is a reversal of it.
    fn unreversed(&self) -> Option<SharedComparator> {
        None
    }
}

pub type SharedComparator = Arc<dyn SpreadsheetComparator>;

#[derive(Debug)]
pub struct ComparatorKind;

impl PluginKind for ComparatorKind {
    const LABEL: &'static str = "comparator";
    type Plugin = SharedComparator;

    fn reverse(comparator: SharedComparator) -> Result<SharedComparator> {
        Ok(reverse_comparator(comparator))
    }
}

/// Reversing a reversed comparator hands back the original instead of wrapping twice.
pub fn reverse_comparator(comparator: SharedComparator) -> SharedComparator {
    match comparator.unreversed() {
        Some(inner) => inner,
        None => Arc::new(ReversedComparator::new(comparator)),
    }
}

/// Absent values sort after present ones and unconvertible values after convertible ones, whatever
/// the comparator's direction. Two absent or two unconvertible values tie.
pub fn compare_values(
    comparator: &dyn SpreadsheetComparator,
    left: Option<&SpreadsheetValue>,
    right: Option<&SpreadsheetValue>,
    converter: &dyn ValueConverter,
) -> Ordering {
    let (left, right) = match (left, right) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(left), Some(right)) => (left, right),
    };

    let target = comparator.value_type();
    match (converter.convert(left, target), converter.convert(right, target)) {
        (Ok(left), Ok(right)) => comparator.compare(&left, &right),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderContext;

    fn comparator(name: &str) -> SharedComparator {
        builtin_comparators()
            .resolve(&PluginName::with(name).unwrap(), &[], &ProviderContext::new())
            .unwrap()
    }

    #[test]
    fn nulls_last_in_both_directions() {
        let up = comparator("text");
        let down = reverse_comparator(up.clone());
        let value = SpreadsheetValue::text("a");
        for c in [&up, &down] {
            assert_eq!(
                compare_values(c.as_ref(), None, Some(&value), &DefaultConverter),
                Ordering::Greater
            );
            assert_eq!(
                compare_values(c.as_ref(), Some(&value), None, &DefaultConverter),
                Ordering::Less
            );
            assert_eq!(compare_values(c.as_ref(), None, None, &DefaultConverter), Ordering::Equal);
        }
    }

    #[test]
    fn unconvertible_after_convertible_and_tied_with_each_other() {
        let number = comparator("number");
        let one = SpreadsheetValue::Number(1.0);
        let word = SpreadsheetValue::text("one");
        let error = SpreadsheetValue::Error("#N/A".to_string());

        assert_eq!(
            compare_values(number.as_ref(), Some(&word), Some(&one), &DefaultConverter),
            Ordering::Greater
        );
        let down = reverse_comparator(number.clone());
        assert_eq!(
            compare_values(down.as_ref(), Some(&one), Some(&word), &DefaultConverter),
            Ordering::Less
        );
        assert_eq!(
            compare_values(number.as_ref(), Some(&word), Some(&error), &DefaultConverter),
            Ordering::Equal
        );
    }

    #[test]
    fn reverse_twice_returns_original() {
        let text = comparator("text");
        let reversed = reverse_comparator(text.clone());
        assert_eq!(reversed.name().text(), "text-reversed");
        assert!(Arc::ptr_eq(&reverse_comparator(reversed), &text));
    }
}
