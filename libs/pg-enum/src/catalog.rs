//! Reading enum labels and enum array types from the system catalogs.
//!
//! Both queries are rendered by small `Display` structs so their exact text
//! can be checked without a connection.

use crate::{getters::Getter, DatabaseOptions};
use sql_connection::SyncSqlConnection;
use sql_ddl::IteratorJoin;
use std::fmt::{self, Display};

/// `SELECT ... FROM pg_enum`, one row per label.
///
/// ```
/// # use pg_enum::catalog::EnumLabelsQuery;
/// let query = EnumLabelsQuery::for_server_version(90000, 90100);
/// assert_eq!(
///     query.to_string(),
///     "SELECT CAST(enumtypid AS integer) AS v, enumlabel FROM pg_enum ORDER BY enumtypid"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumLabelsQuery {
    /// Order labels within a type by `enumsortorder`. Older servers have no
    /// such column and return labels in declaration order.
    pub with_sort_order: bool,
}

impl EnumLabelsQuery {
    pub fn for_server_version(server_version: u32, sort_order_min_version: u32) -> Self {
        Self {
            with_sort_order: server_version >= sort_order_min_version,
        }
    }
}

impl Display for EnumLabelsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT CAST(enumtypid AS integer) AS v, enumlabel FROM pg_enum ORDER BY enumtypid")?;

        if self.with_sort_order {
            f.write_str(", enumsortorder")?;
        }

        Ok(())
    }
}

/// `SELECT ... FROM pg_type` for the array types of the given enum types, all
/// in one query.
///
/// With no enum types the filter becomes `(1 = 0)`: the query keeps its shape
/// and returns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayTypesQuery<'a> {
    pub enum_type_ids: &'a [u32],
}

impl Display for ArrayTypesQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT typname, CAST(typarray AS integer) AS v, CAST(oid AS integer) AS sv FROM pg_type WHERE (")?;

        if self.enum_type_ids.is_empty() {
            f.write_str("(1 = 0)")?;
        } else {
            f.write_str("(oid IN (")?;
            self.enum_type_ids.iter().join(", ", f)?;
            f.write_str("))")?;
        }

        f.write_str(" AND (typarray != 0))")
    }
}

/// One row of the label query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub type_id: u32,
    pub label: String,
}

/// One row of the array type query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTypeRow {
    pub type_name: String,
    /// `typarray`, aliased `v`.
    pub array_type_id: u32,
    /// The enum type's own oid, aliased `sv`.
    pub element_type_id: u32,
}

/// Everything one catalog read produced, in the order the server returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRows {
    pub labels: Vec<LabelRow>,
    pub array_types: Vec<ArrayTypeRow>,
}

/// Run the label query, then, when array support is on, the array type query
/// for every enum type the first one found.
#[tracing::instrument(skip(conn))]
pub fn read<C>(conn: &C, options: &DatabaseOptions) -> crate::Result<CatalogRows>
where
    C: SyncSqlConnection + ?Sized,
{
    let server_version = conn.server_version()?;
    let labels = read_labels(conn, EnumLabelsQuery::for_server_version(server_version, options.sort_order_min_version))?;

    let array_types = if options.array_support {
        let mut type_ids: Vec<u32> = labels.iter().map(|row| row.type_id).collect();
        type_ids.sort_unstable();
        type_ids.dedup();

        read_array_types(conn, ArrayTypesQuery { enum_type_ids: &type_ids })?
    } else {
        Vec::new()
    };

    tracing::debug!(
        labels = labels.len(),
        array_types = array_types.len(),
        server_version,
        "read enum catalog"
    );

    Ok(CatalogRows { labels, array_types })
}

fn read_labels<C>(conn: &C, query: EnumLabelsQuery) -> crate::Result<Vec<LabelRow>>
where
    C: SyncSqlConnection + ?Sized,
{
    let sql = query.to_string();
    tracing::debug!(%sql);

    let rows = conn.query_raw(&sql)?;
    let mut labels = Vec::with_capacity(rows.len());

    for row in rows {
        labels.push(LabelRow {
            type_id: row.get_expect_oid("v")?,
            label: row.get_expect_string("enumlabel")?,
        });
    }

    Ok(labels)
}

fn read_array_types<C>(conn: &C, query: ArrayTypesQuery<'_>) -> crate::Result<Vec<ArrayTypeRow>>
where
    C: SyncSqlConnection + ?Sized,
{
    let sql = query.to_string();
    tracing::debug!(%sql);

    let rows = conn.query_raw(&sql)?;
    let mut array_types = Vec::with_capacity(rows.len());

    for row in rows {
        array_types.push(ArrayTypeRow {
            type_name: row.get_expect_string("typname")?,
            array_type_id: row.get_expect_oid("v")?,
            element_type_id: row.get_expect_oid("sv")?,
        });
    }

    Ok(array_types)
}
