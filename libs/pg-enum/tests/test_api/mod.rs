#![allow(dead_code)]

use parking_lot::Mutex;
use pg_enum::*;
use sql_connection::{Error as ConnectionError, ErrorKind as ConnectionErrorKind, ResultSet};
use std::{
    io,
    sync::{Arc, Barrier},
};

pub const LABELS_SQL: &str =
    "SELECT CAST(enumtypid AS integer) AS v, enumlabel FROM pg_enum ORDER BY enumtypid, enumsortorder";

pub const LABELS_SQL_WITHOUT_SORT_ORDER: &str =
    "SELECT CAST(enumtypid AS integer) AS v, enumlabel FROM pg_enum ORDER BY enumtypid";

pub const NO_ARRAY_TYPES_SQL: &str =
    "SELECT typname, CAST(typarray AS integer) AS v, CAST(oid AS integer) AS sv FROM pg_type WHERE ((1 = 0) AND (typarray != 0))";

pub const ARRAY_TYPES_SQL: &str =
    "SELECT typname, CAST(typarray AS integer) AS v, CAST(oid AS integer) AS sv FROM pg_type WHERE ((oid IN (1)) AND (typarray != 0))";

/// A connection that records every statement and answers the two catalog
/// queries from in-memory rows.
#[derive(Debug)]
pub struct MockConnection {
    server_version: u32,
    sqls: Mutex<Vec<String>>,
    labels: Mutex<Vec<(i64, String)>>,
    array_types: Mutex<Vec<(String, i64, i64)>>,
    columns: Vec<ColumnEntry>,
    failing: Mutex<Option<&'static str>>,
    label_rows_override: Mutex<Option<ResultSet>>,
    labels_pause: Mutex<Option<Arc<Barrier>>>,
}

impl MockConnection {
    /// An empty catalog on a current server.
    pub fn new() -> Self {
        Self {
            server_version: 150004,
            sqls: Mutex::new(Vec::new()),
            labels: Mutex::new(Vec::new()),
            array_types: Mutex::new(Vec::new()),
            columns: vec![
                (
                    "a".to_owned(),
                    ColumnMetadata::new(Some(ColumnType::Enum), Some(1)),
                ),
                ("b".to_owned(), ColumnMetadata::new(None, Some(1234))),
            ],
            failing: Mutex::new(None),
            label_rows_override: Mutex::new(None),
            labels_pause: Mutex::new(None),
        }
    }

    /// One enum type (oid 1, labels a b c) and one array type row whose
    /// element oid is not that enum.
    pub fn with_fixture() -> Self {
        let conn = Self::new();
        conn.set_labels(&[(1, "a"), (1, "b"), (1, "c")]);
        conn.set_array_types(&[("enum1", 212389, 212388)]);
        conn
    }

    pub fn with_server_version(mut self, server_version: u32) -> Self {
        self.server_version = server_version;
        self
    }

    pub fn set_labels(&self, labels: &[(i64, &str)]) {
        *self.labels.lock() = labels.iter().map(|(v, label)| (*v, (*label).to_owned())).collect();
    }

    pub fn set_array_types(&self, array_types: &[(&str, i64, i64)]) {
        *self.array_types.lock() = array_types
            .iter()
            .map(|(typname, v, sv)| ((*typname).to_owned(), *v, *sv))
            .collect();
    }

    /// Answer the label query with `result_set` as is.
    pub fn set_label_rows(&self, result_set: ResultSet) {
        *self.label_rows_override.lock() = Some(result_set);
    }

    /// The next label query reads its rows, then waits on `barrier` twice:
    /// once to signal that the read happened, once to be let through.
    pub fn pause_next_labels_query(&self, barrier: Arc<Barrier>) {
        *self.labels_pause.lock() = Some(barrier);
    }

    /// Make every statement starting with `prefix` fail until `recover`.
    pub fn fail_on(&self, prefix: &'static str) {
        *self.failing.lock() = Some(prefix);
    }

    pub fn recover(&self) {
        *self.failing.lock() = None;
    }

    /// The statements run since the last call, oldest first.
    pub fn sqls(&self) -> Vec<String> {
        std::mem::take(&mut *self.sqls.lock())
    }

    fn record(&self, sql: &str) -> sql_connection::Result<()> {
        self.sqls.lock().push(sql.to_owned());

        match *self.failing.lock() {
            Some(prefix) if sql.starts_with(prefix) => {
                let err = io::Error::new(io::ErrorKind::ConnectionReset, "server closed the connection");
                let mut builder = ConnectionError::builder(ConnectionErrorKind::query_error(err));
                builder.set_original_code("08006");

                Err(builder.build())
            }
            _ => Ok(()),
        }
    }
}

impl SyncSqlConnection for MockConnection {
    fn query_raw(&self, sql: &str) -> sql_connection::Result<ResultSet> {
        self.record(sql)?;

        let result_set = if sql.starts_with("SELECT CAST(enumtypid") {
            let result_set = match self.label_rows_override.lock().clone() {
                Some(result_set) => result_set,
                None => {
                    let rows = self
                        .labels
                        .lock()
                        .iter()
                        .map(|(v, label)| vec![Value::integer(*v), Value::text(label.as_str())])
                        .collect();

                    ResultSet::new(vec!["v".to_owned(), "enumlabel".to_owned()], rows)
                }
            };

            let pause = self.labels_pause.lock().take();

            if let Some(barrier) = pause {
                barrier.wait();
                barrier.wait();
            }

            result_set
        } else if sql.starts_with("SELECT typname") {
            let rows = self
                .array_types
                .lock()
                .iter()
                .map(|(typname, v, sv)| vec![Value::text(typname.as_str()), Value::integer(*v), Value::integer(*sv)])
                .collect();

            ResultSet::new(vec!["typname".to_owned(), "v".to_owned(), "sv".to_owned()], rows)
        } else {
            ResultSet::new(Vec::new(), Vec::new())
        };

        Ok(result_set)
    }

    fn execute_raw(&self, sql: &str) -> sql_connection::Result<u64> {
        self.record(sql)?;
        Ok(0)
    }

    fn server_version(&self) -> sql_connection::Result<u32> {
        Ok(self.server_version)
    }
}

impl SchemaIntrospector for MockConnection {
    fn parse_table_schema(&self, _table: &str) -> pg_enum::Result<Vec<ColumnEntry>> {
        Ok(self.columns.clone())
    }
}

/// Unquoted identifiers, as in the expected SQL throughout these tests.
pub fn bare_options() -> DatabaseOptions {
    DatabaseOptions::default().with_quoted_identifiers(false)
}

pub fn array_options() -> DatabaseOptions {
    bare_options().with_array_support(true)
}

/// Activate on `conn` and forget the statements activation ran.
pub fn activate(conn: MockConnection, options: DatabaseOptions) -> Database<Arc<MockConnection>> {
    let conn = Arc::new(conn);
    let db = Database::activate(Arc::clone(&conn), options).unwrap();
    conn.sqls();
    db
}

/// The statements of a DDL statement followed by a full registry refresh on
/// an empty catalog.
pub fn ddl_then_refresh(ddl: &str) -> Vec<String> {
    vec![ddl.to_owned(), LABELS_SQL.to_owned(), NO_ARRAY_TYPES_SQL.to_owned()]
}
