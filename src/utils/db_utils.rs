use crate::error::ServiceError;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug)]
pub enum SqlValue {
    Text(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Build a dynamic UPDATE from the keys actually present in the payload.
/// Merge-by-field-presence: omitted keys keep their stored value, present
/// keys are written even when empty or null. Keys are checked against the
/// table's updatable column list before being spliced into the statement.
pub fn build_update_sql(
    table: &str,
    payload: &Map<String, Value>,
    allowed_columns: &[&str],
    id_column: &str,
    id_value: i64,
) -> Result<SqlUpdate, ServiceError> {
    if payload.is_empty() {
        return Err(ServiceError::Validation(
            "No fields provided for update".into(),
        ));
    }

    for key in payload.keys() {
        if !allowed_columns.contains(&key.as_str()) {
            return Err(ServiceError::Validation(format!(
                "Unknown column '{key}' for {table}"
            )));
        }
    }

    // Build SET clause
    let set_clause = payload
        .keys()
        .map(|k| format!("{} = ?", k))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    let mut values = Vec::with_capacity(payload.len() + 1);

    // Convert JSON values → SqlValue
    for value in payload.values() {
        match value {
            Value::String(s) => {
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    values.push(SqlValue::Date(d));
                } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                    values.push(SqlValue::DateTime(dt));
                } else {
                    values.push(SqlValue::Text(s.clone()));
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    values.push(SqlValue::I64(i));
                } else if let Some(f) = n.as_f64() {
                    values.push(SqlValue::F64(f));
                }
            }
            Value::Bool(b) => values.push(SqlValue::Bool(*b)),
            Value::Null => values.push(SqlValue::Null),
            _ => {
                return Err(ServiceError::Validation(
                    "Unsupported JSON value type".into(),
                ));
            }
        }
    }

    // WHERE id = ?
    values.push(SqlValue::I64(id_value));

    Ok(SqlUpdate { sql, values })
}

/// Bind the converted values onto a prepared query, in payload order.
pub fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<SqlValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn builds_set_clause_from_present_keys_only() {
        let map = payload(json!({ "email": "a@x.com", "is_active": 0 }));
        let update =
            build_update_sql("employees", &map, &["email", "is_active"], "employee_id", 7).unwrap();
        assert_eq!(
            update.sql,
            "UPDATE employees SET email = ?, is_active = ? WHERE employee_id = ?"
        );
        assert_eq!(update.values.len(), 3);
    }

    #[test]
    fn empty_payload_is_rejected() {
        let map = Map::new();
        let err = build_update_sql("employees", &map, &["email"], "employee_id", 1).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let map = payload(json!({ "employee_id": 99 }));
        let err = build_update_sql("employees", &map, &["email"], "employee_id", 1).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn date_strings_become_dates() {
        let map = payload(json!({ "dob": "1990-05-01" }));
        let update = build_update_sql("employees", &map, &["dob"], "employee_id", 1).unwrap();
        assert!(matches!(update.values[0], SqlValue::Date(_)));
    }

    #[test]
    fn explicit_null_is_kept_as_a_bind() {
        let map = payload(json!({ "personal_phone": null }));
        let update =
            build_update_sql("employees", &map, &["personal_phone"], "employee_id", 1).unwrap();
        assert!(matches!(update.values[0], SqlValue::Null));
    }
}
