//! PostgreSQL enum support for a SQL connection.
//!
//! The [`Database`](struct.Database.html) handle reads the `pg_enum` and
//! `pg_type` catalogs once on activation and keeps the labels of every enum
//! type in an [`EnumRegistry`](struct.EnumRegistry.html). From there it can
//! annotate introspected columns with their permitted values, decode enum
//! array literals, typecast values for enum columns, and run enum DDL
//! (optionally as part of a reversible [`Migration`](struct.Migration.html)).

#![deny(rust_2018_idioms, unsafe_code)]

pub mod array;
pub mod catalog;
pub mod ddl;
pub mod schema;

mod conversion;
mod database;
mod error;
mod getters;
mod migration;
mod options;
mod registry;
mod type_name;
mod typecast;

pub use self::{
    conversion::{enum_array_proc, install_enum_array_procs, ConversionProc, ConversionProcs},
    database::Database,
    ddl::{AddEnumValueOptions, DropEnumOptions, EnumDdl},
    error::{Error, ErrorKind, Result},
    migration::{Direction, Migration, MigrationSteps},
    options::DatabaseOptions,
    registry::{ArrayTypeLink, EnumCatalog, EnumDescriptor, EnumRegistry},
    schema::{ColumnEntry, ColumnMetadata, ColumnType, SchemaIntrospector},
    type_name::TypeName,
};

pub use sql_connection::{SyncSqlConnection, Value};
