// src/repositories/sql_types.rs
//
// Column conversions shared by the SQLite repositories
//
// Money columns are NUMERIC; SQLite hands them back as INTEGER or REAL, so
// they are read as f64 and re-rendered with two decimals. Timestamps are
// ISO-8601 text with second precision.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::Row;

pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn decimal_column(row: &Row, name: &str) -> rusqlite::Result<BigDecimal> {
    let value: f64 = row.get(name)?;
    BigDecimal::from_str(&format!("{:.2}", value))
        .map_err(|e| conversion_error(row, name, Type::Real, e))
}

pub fn datetime_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDateTime> {
    let text: String = row.get(name)?;
    NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
        .map_err(|e| conversion_error(row, name, Type::Text, e))
}

/// Text column holding a domain enum (`Size`, `OrderStatus`)
pub fn enum_column<T>(row: &Row, name: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(name)?;
    text.parse::<T>()
        .map_err(|e| conversion_error(row, name, Type::Text, e))
}

pub fn decimal_param(value: &BigDecimal) -> String {
    value.to_string()
}

pub fn datetime_param(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

fn conversion_error<E>(row: &Row, name: &str, ty: Type, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let index = row.as_ref().column_index(name).unwrap_or(0);
    rusqlite::Error::FromSqlConversionFailure(index, ty, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Size;
    use rusqlite::Connection;

    fn with_row<T>(sql: &str, f: impl FnOnce(&Row) -> rusqlite::Result<T>) -> rusqlite::Result<T> {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row(sql, [], f)
    }

    #[test]
    fn test_integer_and_real_money_read_with_cents() {
        let price = with_row("SELECT 5 AS price", |row| decimal_column(row, "price")).unwrap();
        assert_eq!(price.to_string(), "5.00");

        let price = with_row("SELECT 4.5 AS price", |row| decimal_column(row, "price")).unwrap();
        assert_eq!(price.to_string(), "4.50");
    }

    #[test]
    fn test_datetime_round_trip() {
        let at = with_row("SELECT '2024-01-15T08:30:00' AS at", |row| {
            datetime_column(row, "at")
        })
        .unwrap();
        assert_eq!(datetime_param(&at), "2024-01-15T08:30:00");
    }

    #[test]
    fn test_unknown_enum_value_is_conversion_failure() {
        let err = with_row("SELECT 'VENTI' AS size", |row| enum_column::<Size>(row, "size"))
            .unwrap_err();
        assert!(matches!(err, rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _)));
    }
}
