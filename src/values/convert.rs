use crate::imports::*;

use super::value::{DATE_FORMAT, DATE_TIME_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/*
    Traits:
    * ValueConverter - Converts a present value to the type a comparator compares in

    Types:
    * DefaultConverter - Text, number, boolean and ISO date/time conversions using the 1899-12-30
      serial day epoch for numbers
*/
pub trait ValueConverter: Send + Sync + std::fmt::Debug {
    fn convert(&self, value: &SpreadsheetValue, target: ValueType) -> Result<SpreadsheetValue>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConverter;

const SECONDS_PER_DAY: f64 = 86_400.0;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

fn serial_of(date_time: NaiveDateTime) -> f64 {
    let delta = date_time.signed_duration_since(epoch());
    delta.num_seconds() as f64 / SECONDS_PER_DAY
}

fn date_time_of(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round();
    if seconds.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    epoch().checked_add_signed(TimeDelta::try_seconds(seconds as i64)?)
}

fn cannot_convert(value: &SpreadsheetValue, target: ValueType) -> anyhow::Error {
    let source = value
        .value_type()
        .map(|ty| ty.label())
        .unwrap_or("error");
    PluginError::invalid_argument(format!("Cannot convert {} {:?} to {}", source, value.to_string(), target))
        .into()
}

impl ValueConverter for DefaultConverter {
    fn convert(&self, value: &SpreadsheetValue, target: ValueType) -> Result<SpreadsheetValue> {
        use SpreadsheetValue as V;

        if value.value_type() == Some(target) {
            return Ok(value.clone());
        }

        let converted = match (value, target) {
            (V::Error(_), _) => None,
            (_, ValueType::Text) => Some(V::Text(value.to_string())),

            (V::Text(text), ValueType::Number) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(V::Number),
            (V::Boolean(b), ValueType::Number) => Some(V::Number(if *b { 1.0 } else { 0.0 })),
            (V::Date(date), ValueType::Number) => {
                Some(V::Number(serial_of(date.and_time(NaiveTime::MIN))))
            }
            (V::DateTime(date_time), ValueType::Number) => Some(V::Number(serial_of(*date_time))),
            (V::Time(time), ValueType::Number) => Some(V::Number(
                time.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY,
            )),

            (V::Number(number), ValueType::Boolean) => Some(V::Boolean(*number != 0.0)),
            (V::Text(text), ValueType::Boolean) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(V::Boolean(true)),
                "false" => Some(V::Boolean(false)),
                _ => None,
            },

            (V::Text(text), ValueType::Date) => {
                NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok().map(V::Date)
            }
            (V::DateTime(date_time), ValueType::Date) => Some(V::Date(date_time.date())),
            (V::Number(number), ValueType::Date) => {
                date_time_of(number.floor()).map(|dt| V::Date(dt.date()))
            }

            (V::Text(text), ValueType::DateTime) => {
                let text = text.trim();
                NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
                    .ok()
                    .map(V::DateTime)
            }
            (V::Date(date), ValueType::DateTime) => Some(V::DateTime(date.and_time(NaiveTime::MIN))),
            (V::Number(number), ValueType::DateTime) => date_time_of(*number).map(V::DateTime),

            (V::Text(text), ValueType::Time) => {
                let text = text.trim();
                NaiveTime::parse_from_str(text, TIME_FORMAT)
                    .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
                    .ok()
                    .map(V::Time)
            }
            (V::DateTime(date_time), ValueType::Time) => Some(V::Time(date_time.time())),
            (V::Number(number), ValueType::Time) => {
                date_time_of(number.fract().abs()).map(|dt| V::Time(dt.time()))
            }

            _ => None,
        };

        converted.ok_or_else(|| cannot_convert(value, target))
    }
}
