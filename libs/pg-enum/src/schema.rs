//! Per-column schema metadata, and attaching enum labels to it.

use crate::EnumCatalog;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

/// The kind of a column, as named by its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Enum,
    String,
    Integer,
    Float,
    Boolean,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Enum => "enum",
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
        }
    }

    /// Find the column type for a type tag. Unknown tags have no type.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "enum" => Some(ColumnType::Enum),
            "string" => Some(ColumnType::String),
            "integer" => Some(ColumnType::Integer),
            "float" => Some(ColumnType::Float),
            "boolean" => Some(ColumnType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = crate::Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::from_tag(tag).ok_or_else(|| crate::ErrorKind::UnknownColumnType(tag.to_owned()).into())
    }
}

/// What introspection knows about a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// The oid of the column's type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<u32>,
    #[serde(default)]
    pub allow_null: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// The permitted labels, for enum columns whose type is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl ColumnMetadata {
    pub fn new(column_type: Option<ColumnType>, oid: Option<u32>) -> Self {
        Self {
            column_type,
            oid,
            allow_null: true,
            ..Default::default()
        }
    }
}

/// A column name with its metadata.
pub type ColumnEntry = (String, ColumnMetadata);

/// Lists the columns of a table, in table order.
pub trait SchemaIntrospector {
    fn parse_table_schema(&self, table: &str) -> crate::Result<Vec<ColumnEntry>>;
}

impl<T> SchemaIntrospector for &T
where
    T: SchemaIntrospector + ?Sized,
{
    fn parse_table_schema(&self, table: &str) -> crate::Result<Vec<ColumnEntry>> {
        (**self).parse_table_schema(table)
    }
}

impl<T> SchemaIntrospector for Arc<T>
where
    T: SchemaIntrospector + ?Sized,
{
    fn parse_table_schema(&self, table: &str) -> crate::Result<Vec<ColumnEntry>> {
        (**self).parse_table_schema(table)
    }
}

/// Attach `enum_values` to every enum column whose type is in `catalog`.
///
/// Columns keep their order. Enum columns with an unknown type, and all other
/// columns, pass through untouched.
pub fn augment(columns: Vec<ColumnEntry>, catalog: &EnumCatalog) -> Vec<ColumnEntry> {
    columns
        .into_iter()
        .map(|(name, mut metadata)| {
            if metadata.column_type == Some(ColumnType::Enum) {
                if let Some(descriptor) = metadata.oid.and_then(|oid| catalog.lookup(oid)) {
                    metadata.enum_values = Some(descriptor.labels.clone());
                }
            }

            (name, metadata)
        })
        .collect()
}
