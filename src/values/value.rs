use crate::imports::*;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/*
    Types:
    * SpreadsheetValue - A present cell value, absent cells are modelled as Option::None by callers
    * ValueType - The conversion targets a comparator may ask for
*/
#[derive(Debug, Clone, PartialEq)]
pub enum SpreadsheetValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    /// A formula error such as `#DIV/0!`, never convertible.
    Error(String),
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

impl SpreadsheetValue {
    pub fn text(text: impl Into<String>) -> Self {
        SpreadsheetValue::Text(text.into())
    }

    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            SpreadsheetValue::Text(_) => Some(ValueType::Text),
            SpreadsheetValue::Number(_) => Some(ValueType::Number),
            SpreadsheetValue::Boolean(_) => Some(ValueType::Boolean),
            SpreadsheetValue::Date(_) => Some(ValueType::Date),
            SpreadsheetValue::DateTime(_) => Some(ValueType::DateTime),
            SpreadsheetValue::Time(_) => Some(ValueType::Time),
            SpreadsheetValue::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SpreadsheetValue::Error(_))
    }

    /// Interprets literal cell input, most specific type first, anything else stays text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return SpreadsheetValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return SpreadsheetValue::Boolean(false);
        }
        if trimmed.starts_with('#') && trimmed.len() > 1 {
            return SpreadsheetValue::Error(trimmed.to_string());
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return SpreadsheetValue::Number(number);
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return SpreadsheetValue::Date(date);
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT) {
            return SpreadsheetValue::DateTime(date_time);
        }
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, TIME_FORMAT) {
            return SpreadsheetValue::Time(time);
        }
        SpreadsheetValue::Text(text.to_string())
    }
}

impl std::fmt::Display for SpreadsheetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpreadsheetValue::Text(text) => write!(f, "{}", text),
            SpreadsheetValue::Number(number) => write!(f, "{}", number),
            SpreadsheetValue::Boolean(true) => write!(f, "TRUE"),
            SpreadsheetValue::Boolean(false) => write!(f, "FALSE"),
            SpreadsheetValue::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            SpreadsheetValue::DateTime(date_time) => {
                write!(f, "{}", date_time.format(DATE_TIME_FORMAT))
            }
            SpreadsheetValue::Time(time) => write!(f, "{}", time.format(TIME_FORMAT)),
            SpreadsheetValue::Error(error) => write!(f, "{}", error),
        }
    }
}

impl From<&str> for SpreadsheetValue {
    fn from(text: &str) -> Self {
        SpreadsheetValue::Text(text.to_string())
    }
}

impl From<f64> for SpreadsheetValue {
    fn from(number: f64) -> Self {
        SpreadsheetValue::Number(number)
    }
}

impl From<bool> for SpreadsheetValue {
    fn from(value: bool) -> Self {
        SpreadsheetValue::Boolean(value)
    }
}

impl From<NaiveDate> for SpreadsheetValue {
    fn from(date: NaiveDate) -> Self {
        SpreadsheetValue::Date(date)
    }
}

impl From<NaiveDateTime> for SpreadsheetValue {
    fn from(date_time: NaiveDateTime) -> Self {
        SpreadsheetValue::DateTime(date_time)
    }
}

impl From<NaiveTime> for SpreadsheetValue {
    fn from(time: NaiveTime) -> Self {
        SpreadsheetValue::Time(time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Text,
    Number,
    Boolean,
    Date,
    DateTime,
    Time,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::Text,
        ValueType::Number,
        ValueType::Boolean,
        ValueType::Date,
        ValueType::DateTime,
        ValueType::Time,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::DateTime => "date-time",
            ValueType::Time => "time",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ValueType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ValueType::ALL
            .into_iter()
            .find(|ty| ty.label() == s)
            .ok_or_else(|| PluginError::invalid_argument(format!("Unknown value type {:?}", s)).into())
    }
}

text_serde!(ValueType);
