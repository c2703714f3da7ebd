use crate::{
    error::{Error, ErrorKind},
    Value,
};
use std::{collections::BTreeMap, sync::Arc};

/// An owned version of a `Row` in a `ResultSet`. See
/// [ResultRowRef](struct.ResultRowRef.html) for documentation on data access.
#[derive(Debug, PartialEq)]
pub struct ResultRow {
    pub(crate) name_to_index: Arc<BTreeMap<String, usize>>,
    pub(crate) values: Vec<Value>,
}

impl IntoIterator for ResultRow {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// A reference to a `Row` in a `ResultSet`. The columns can be accessed either
/// through their position or using the column name.
#[derive(Debug, PartialEq)]
pub struct ResultRowRef<'a> {
    pub(crate) name_to_index: Arc<BTreeMap<String, usize>>,
    pub(crate) values: &'a Vec<Value>,
}

impl ResultRow {
    /// Take a value from a certain position in the row, if having a value in
    /// that position.
    pub fn at(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    /// Take a value with the given column name from the row.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.name_to_index.get(name).and_then(|idx| self.values.get(*idx))
    }

    /// Like [get](#method.get), but a missing column is an error naming it.
    pub fn try_get(&self, name: &str) -> crate::Result<&Value> {
        self.get(name).ok_or_else(|| {
            Error::builder(ErrorKind::ColumnNotFound {
                column: name.to_owned(),
            })
            .build()
        })
    }

    /// Make a referring [ResultRowRef](struct.ResultRowRef.html).
    pub fn as_ref(&self) -> ResultRowRef<'_> {
        ResultRowRef {
            name_to_index: Arc::clone(&self.name_to_index),
            values: &self.values,
        }
    }
}

impl<'a> ResultRowRef<'a> {
    /// Take a value from a certain position in the row, if having a value in
    /// that position.
    pub fn at(&self, i: usize) -> Option<&'a Value> {
        self.values.get(i)
    }

    /// Take a value with the given column name from the row.
    ///
    /// ```
    /// # use sql_connection::*;
    /// # let names = vec!["v".to_string(), "enumlabel".to_string()];
    /// # let rows = vec![vec![Value::integer(1), Value::text("sad")]];
    /// # let result_set = ResultSet::new(names, rows);
    /// # let row = result_set.first().unwrap();
    /// assert_eq!(row.at(1), row.get("enumlabel"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.name_to_index.get(name).and_then(|idx| self.values.get(*idx))
    }
}
