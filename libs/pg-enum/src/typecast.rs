use crate::{ColumnType, ErrorKind};
use sql_connection::Value;

impl ColumnType {
    /// Convert `value` to what a column of this type holds.
    ///
    /// Enum columns take the textual form of any value and never fail: only
    /// the server knows which labels are valid.
    pub fn typecast(self, value: Value) -> crate::Result<Value> {
        if value.is_null() {
            return Ok(null_of(self));
        }

        match self {
            ColumnType::Enum | ColumnType::String => Ok(match value {
                Value::Text(_) => value,
                other => Value::text(other.to_string()),
            }),
            ColumnType::Integer => match &value {
                Value::Integer(_) => Ok(value),
                Value::Text(Some(s)) => s.trim().parse::<i64>().map(Value::from).map_err(|_| invalid(self, &value)),
                _ => Err(invalid(self, &value)),
            },
            ColumnType::Float => match &value {
                Value::Float(_) => Ok(value),
                Value::Integer(Some(i)) => Ok(Value::from(*i as f64)),
                Value::Text(Some(s)) => s.trim().parse::<f64>().map(Value::from).map_err(|_| invalid(self, &value)),
                _ => Err(invalid(self, &value)),
            },
            ColumnType::Boolean => match &value {
                Value::Boolean(_) => Ok(value),
                Value::Integer(Some(0)) => Ok(Value::from(false)),
                Value::Integer(Some(1)) => Ok(Value::from(true)),
                Value::Text(Some(s)) => match s.trim().to_ascii_lowercase().as_str() {
                    "t" | "true" | "1" | "y" | "yes" | "on" => Ok(Value::from(true)),
                    "f" | "false" | "0" | "n" | "no" | "off" => Ok(Value::from(false)),
                    _ => Err(invalid(self, &value)),
                },
                _ => Err(invalid(self, &value)),
            },
        }
    }
}

fn null_of(column_type: ColumnType) -> Value {
    match column_type {
        ColumnType::Enum | ColumnType::String => Value::Text(None),
        ColumnType::Integer => Value::Integer(None),
        ColumnType::Float => Value::Float(None),
        ColumnType::Boolean => Value::Boolean(None),
    }
}

fn invalid(column_type: ColumnType, value: &Value) -> crate::Error {
    ErrorKind::InvalidValue {
        column_type,
        value: value.to_string(),
    }
    .into()
}
