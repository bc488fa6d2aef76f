use crate::imports::*;

use super::{ComparatorKind, SharedComparator, SpreadsheetComparator};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::cmp::Ordering;

/*
    Consts:
    * BUILTIN_COMPARATOR_URL - Base of the url every built-in comparator is published under

    Statics:
    * BUILTIN_COMPARATORS - Registry of the built-in comparators, built on first use and never changed

    Types:
    * BuiltinComparator - A named ordering over one ValueType
*/
pub const BUILTIN_COMPARATOR_URL: &str = "https://github.com/plugsheet/comparator/";

type Order = fn(&SpreadsheetValue, &SpreadsheetValue) -> Ordering;

#[derive(Debug)]
pub struct BuiltinComparator {
    name: PluginName,
    value_type: ValueType,
    order: Order,
}

impl SpreadsheetComparator for BuiltinComparator {
    fn name(&self) -> PluginName {
        self.name.clone()
    }

    fn value_type(&self) -> ValueType {
        self.value_type
    }

    fn compare(&self, left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
        (self.order)(left, right)
    }
}

fn text_order(left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Text(l), SpreadsheetValue::Text(r)) => l.cmp(r),
        _ => Ordering::Equal,
    }
}

fn text_case_insensitive_order(left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Text(l), SpreadsheetValue::Text(r)) => {
            l.to_lowercase().cmp(&r.to_lowercase())
        }
        _ => Ordering::Equal,
    }
}

fn number_order(left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Number(l), SpreadsheetValue::Number(r)) => l.total_cmp(r),
        _ => Ordering::Equal,
    }
}

fn boolean_order(left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Boolean(l), SpreadsheetValue::Boolean(r)) => l.cmp(r),
        _ => Ordering::Equal,
    }
}

fn date_time_order(left: &SpreadsheetValue, right: &SpreadsheetValue) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Date(l), SpreadsheetValue::Date(r)) => l.cmp(r),
        (SpreadsheetValue::DateTime(l), SpreadsheetValue::DateTime(r)) => l.cmp(r),
        (SpreadsheetValue::Time(l), SpreadsheetValue::Time(r)) => l.cmp(r),
        _ => Ordering::Equal,
    }
}

fn by_date<K: Ord>(left: &SpreadsheetValue, right: &SpreadsheetValue, key: fn(&NaiveDate) -> K) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Date(l), SpreadsheetValue::Date(r)) => key(l).cmp(&key(r)),
        _ => Ordering::Equal,
    }
}

fn by_time<K: Ord>(left: &SpreadsheetValue, right: &SpreadsheetValue, key: fn(&NaiveTime) -> K) -> Ordering {
    match (left, right) {
        (SpreadsheetValue::Time(l), SpreadsheetValue::Time(r)) => key(l).cmp(&key(r)),
        _ => Ordering::Equal,
    }
}

const BUILTINS: &[(&str, ValueType, Order)] = &[
    ("text", ValueType::Text, text_order),
    ("text-case-insensitive", ValueType::Text, text_case_insensitive_order),
    ("number", ValueType::Number, number_order),
    ("boolean", ValueType::Boolean, boolean_order),
    ("date", ValueType::Date, date_time_order),
    ("date-time", ValueType::DateTime, date_time_order),
    ("time", ValueType::Time, date_time_order),
    ("year", ValueType::Date, |l, r| by_date(l, r, |d| d.year())),
    ("month-of-year", ValueType::Date, |l, r| by_date(l, r, |d| d.month())),
    ("day-of-month", ValueType::Date, |l, r| by_date(l, r, |d| d.day())),
    ("day-of-week", ValueType::Date, |l, r| {
        by_date(l, r, |d| d.weekday().number_from_sunday())
    }),
    ("day-of-year", ValueType::Date, |l, r| by_date(l, r, |d| d.ordinal())),
    ("hour-of-day", ValueType::Time, |l, r| by_time(l, r, |t| t.hour())),
    ("minute-of-hour", ValueType::Time, |l, r| by_time(l, r, |t| t.minute())),
    ("seconds-of-minute", ValueType::Time, |l, r| by_time(l, r, |t| t.second())),
];

fn build_builtins() -> Result<RegistryProvider<ComparatorKind>> {
    let base = Url::parse(BUILTIN_COMPARATOR_URL)?;
    let mut registry = RegistryProvider::<ComparatorKind>::builder();
    for &(text, value_type, order) in BUILTINS {
        let name = PluginName::with(text)?;
        let url = base.join(text)?;
        let comparator: SharedComparator = Arc::new(BuiltinComparator {
            name: name.clone(),
            value_type,
            order,
        });
        registry = registry.singleton(PluginInfo::new(url, name), comparator)?;
    }
    Ok(registry.build())
}

static BUILTIN_COMPARATORS: LazyLock<SharedProvider<ComparatorKind>> = LazyLock::new(|| {
    Arc::new(build_builtins().expect("Built-in comparator table is invalid"))
});

/// The shared provider of built-in comparators, every call hands out the same instance.
pub fn builtin_comparators() -> SharedProvider<ComparatorKind> {
    BUILTIN_COMPARATORS.clone()
}
