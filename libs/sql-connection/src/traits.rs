use crate::ResultSet;
use std::sync::Arc;

/// A generic synchronous SQL connection interface.
///
/// One statement is in flight at a time. Implementations decide how to talk to
/// the server; callers only hand over finished SQL text.
pub trait SyncSqlConnection {
    /// Run a query given as SQL and return its rows. Columns are addressed by
    /// their alias in the select list.
    fn query_raw(&self, sql: &str) -> crate::Result<ResultSet>;

    /// Run a statement given as SQL, returning the number of affected rows.
    /// DDL statements usually report zero.
    fn execute_raw(&self, sql: &str) -> crate::Result<u64>;

    /// The server version as an integer, in the `server_version_num` encoding
    /// (`90100` is 9.1.0, `150004` is 15.4).
    fn server_version(&self) -> crate::Result<u32>;
}

impl<T> SyncSqlConnection for &T
where
    T: SyncSqlConnection + ?Sized,
{
    fn query_raw(&self, sql: &str) -> crate::Result<ResultSet> {
        (**self).query_raw(sql)
    }

    fn execute_raw(&self, sql: &str) -> crate::Result<u64> {
        (**self).execute_raw(sql)
    }

    fn server_version(&self) -> crate::Result<u32> {
        (**self).server_version()
    }
}

impl<T> SyncSqlConnection for Arc<T>
where
    T: SyncSqlConnection + ?Sized,
{
    fn query_raw(&self, sql: &str) -> crate::Result<ResultSet> {
        (**self).query_raw(sql)
    }

    fn execute_raw(&self, sql: &str) -> crate::Result<u64> {
        (**self).execute_raw(sql)
    }

    fn server_version(&self) -> crate::Result<u32> {
        (**self).server_version()
    }
}
