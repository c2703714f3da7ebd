mod result_row;

pub use result_row::*;

use crate::Value;
use std::{
    collections::{btree_map::Keys, BTreeMap},
    sync::Arc,
};

/// Encapsulates a set of results and their respective column names.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSet {
    pub(crate) rows: Vec<Vec<Value>>,
    pub(crate) name_to_index: Arc<BTreeMap<String, usize>>,
}

impl ResultSet {
    /// Creates a new instance, bound to the given column names and result rows.
    ///
    /// ```
    /// # use sql_connection::*;
    /// let names = vec!["v".to_string(), "enumlabel".to_string()];
    /// let rows = vec![vec![Value::integer(1), Value::text("happy")]];
    ///
    /// let result_set = ResultSet::new(names, rows);
    /// let row = result_set.first().unwrap();
    ///
    /// assert_eq!(row.get("enumlabel"), Some(&Value::text("happy")));
    /// ```
    pub fn new(names: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name_to_index: Arc::new(Self::build_name_map(names)),
            rows,
        }
    }

    /// An iterator of column names.
    pub fn columns(&self) -> Keys<'_, String, usize> {
        self.name_to_index.keys()
    }

    /// Returns the number of rows in the `ResultSet`.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the `ResultSet` contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first row of the `ResultSet`, or None if the set is empty.
    pub fn first(&self) -> Option<ResultRowRef<'_>> {
        self.get(0)
    }

    /// Returns a reference to a row in a given position.
    pub fn get(&self, index: usize) -> Option<ResultRowRef<'_>> {
        self.rows.get(index).map(|row| ResultRowRef {
            name_to_index: Arc::clone(&self.name_to_index),
            values: row,
        })
    }

    /// Creates a lookup map for column names.
    fn build_name_map(names: Vec<String>) -> BTreeMap<String, usize> {
        names
            .into_iter()
            .enumerate()
            .fold(BTreeMap::new(), |mut acc, (i, name)| {
                acc.insert(name, i);
                acc
            })
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRow;
    type IntoIter = ResultSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        ResultSetIterator {
            name_to_index: self.name_to_index,
            internal_iterator: self.rows.into_iter(),
        }
    }
}

/// Thin iterator for ResultSet rows.
pub struct ResultSetIterator {
    pub(crate) name_to_index: Arc<BTreeMap<String, usize>>,
    pub(crate) internal_iterator: std::vec::IntoIter<Vec<Value>>,
}

impl Iterator for ResultSetIterator {
    type Item = ResultRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.internal_iterator.next().map(|row| ResultRow {
            name_to_index: Arc::clone(&self.name_to_index),
            values: row,
        })
    }
}
