//! Functions for fetching typed values from catalog result rows

use sql_connection::{Error, ErrorKind, ResultRow};

pub(crate) trait Getter {
    fn get_expect_string(&self, name: &str) -> sql_connection::Result<String>;
    fn get_expect_oid(&self, name: &str) -> sql_connection::Result<u32>;
}

impl Getter for ResultRow {
    fn get_expect_string(&self, name: &str) -> sql_connection::Result<String> {
        self.try_get(name)?
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| Error::builder(ErrorKind::ResultTypeMismatch("text")).build())
    }

    // Catalog identifiers are cast to integer in the query, but some drivers
    // still hand them back as text.
    fn get_expect_oid(&self, name: &str) -> sql_connection::Result<u32> {
        let value = self.try_get(name)?;

        let oid = value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
            .ok_or_else(|| Error::builder(ErrorKind::ResultTypeMismatch("integer")).build())?;

        // `CAST(oid AS integer)` wraps oids above i32::MAX to negative int4
        // values; the bit pattern is the oid.
        let oid = u32::try_from(oid).or_else(|_| i32::try_from(oid).map(|oid| oid as u32))?;

        Ok(oid)
    }
}
