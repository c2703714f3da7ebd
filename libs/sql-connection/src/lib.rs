#![deny(missing_docs, rust_2018_idioms)]

//! Synchronous SQL connection interface shared by the enum extension and its
//! test harnesses. The extension only ever sends complete SQL strings and reads
//! rows back by column alias, so this is all the surface it needs from a
//! database driver.

mod error;
mod result_set;
mod traits;
mod value;

pub use error::{Error, ErrorBuilder, ErrorKind};
pub use result_set::{ResultRow, ResultRowRef, ResultSet, ResultSetIterator};
pub use traits::SyncSqlConnection;
pub use value::Value;

/// A specialized `Result` for connection operations.
pub type Result<T> = std::result::Result<T, Error>;
