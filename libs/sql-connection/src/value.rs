use std::fmt::{self, Display};

/// A single cell in a result row, or a decoded wire value.
///
/// Every variant carries an `Option` so a `NULL` still knows which type it
/// was read as.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(Option<i64>),
    /// Floating point number.
    Float(Option<f64>),
    /// String value.
    Text(Option<String>),
    /// Boolean value.
    Boolean(Option<bool>),
    /// A one-dimensional array value.
    Array(Option<Vec<Value>>),
}

impl Value {
    /// Creates a new text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    /// Creates a new integer value.
    pub fn integer(value: impl Into<i64>) -> Self {
        Self::Integer(Some(value.into()))
    }

    /// Creates a new array value.
    pub fn array<I, V>(value: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Array(Some(value.into_iter().map(Into::into).collect()))
    }

    /// `true` if the `Value` is null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Integer(i) => i.is_none(),
            Value::Float(f) => f.is_none(),
            Value::Text(t) => t.is_none(),
            Value::Boolean(b) => b.is_none(),
            Value::Array(a) => a.is_none(),
        }
    }

    /// Returns a `&str` if the value is text, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(Some(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns an `i64` if the value is an integer, otherwise `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => *i,
            _ => None,
        }
    }

    /// Returns a `bool` if the value is a boolean, otherwise `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => *b,
            _ => None,
        }
    }

    /// Returns a slice of the elements if the value is an array, otherwise `None`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(Some(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Consumes the value, returning the string if it is text.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Text(s) => s,
            _ => None,
        }
    }
}

/// Renders the value the way it reads as text: scalars plainly, arrays as a
/// brace-delimited literal and nulls as `NULL`.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(Some(i)) => write!(f, "{i}"),
            Value::Float(Some(n)) => write!(f, "{n}"),
            Value::Text(Some(s)) => f.write_str(s),
            Value::Boolean(Some(b)) => write!(f, "{b}"),
            Value::Array(Some(items)) => {
                f.write_str("{")?;

                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }

                    item.fmt(f)?;
                }

                f.write_str("}")
            }
            _ => f.write_str("NULL"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Some(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(Some(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(Some(i64::from(i)))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(Some(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(Some(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(Some(b))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => value.into(),
            None => Value::Text(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_display_as_brace_literals() {
        let value = Value::array(["a", "b"]);
        assert_eq!(value.to_string(), "{a,b}");
    }

    #[test]
    fn typed_nulls_are_null() {
        assert!(Value::Integer(None).is_null());
        assert!(Value::from(None::<&str>).is_null());
        assert_eq!(Value::Text(None).to_string(), "NULL");
    }
}
