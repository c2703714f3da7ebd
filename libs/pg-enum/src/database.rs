use crate::{
    catalog,
    conversion::{install_enum_array_procs, ConversionProcs},
    schema::{self, ColumnEntry, SchemaIntrospector},
    AddEnumValueOptions, ColumnType, DatabaseOptions, DropEnumOptions, EnumCatalog, EnumDdl, EnumDescriptor,
    EnumRegistry, ErrorKind, TypeName,
};
use parking_lot::Mutex;
use sql_connection::{SyncSqlConnection, Value};
use std::sync::Arc;

/// A connection with enum support activated.
///
/// Activation reads the enum catalog once. Every enum DDL statement run
/// through this handle reads it again, so the registry always matches what
/// the handle itself changed. Changes made elsewhere are picked up after
/// [`invalidate_enum_labels`](#method.invalidate_enum_labels) or an explicit
/// [`refresh_enum_labels`](#method.refresh_enum_labels).
#[derive(Debug)]
pub struct Database<C> {
    conn: C,
    options: DatabaseOptions,
    registry: EnumRegistry,
    conversion_procs: Arc<ConversionProcs>,
    /// Held for a whole refresh, so reads commit in the order they ran.
    refresh_lock: Mutex<()>,
}

impl<C> Database<C>
where
    C: SyncSqlConnection,
{
    /// Activate enum support on `conn`. Fails, and leaves nothing behind, if
    /// the catalog cannot be read.
    pub fn activate(conn: C, options: DatabaseOptions) -> crate::Result<Self> {
        Self::activate_with_conversion_procs(conn, options, Arc::new(ConversionProcs::new()))
    }

    /// Like [`activate`](#method.activate), installing array conversions into
    /// an existing table shared with other users of the connection.
    #[tracing::instrument(skip(conn, conversion_procs))]
    pub fn activate_with_conversion_procs(
        conn: C,
        options: DatabaseOptions,
        conversion_procs: Arc<ConversionProcs>,
    ) -> crate::Result<Self> {
        let db = Self {
            conn,
            options,
            registry: EnumRegistry::new(),
            conversion_procs,
            refresh_lock: Mutex::new(()),
        };

        db.refresh_enum_labels()?;

        Ok(db)
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    pub fn registry(&self) -> &EnumRegistry {
        &self.registry
    }

    pub fn conversion_procs(&self) -> &Arc<ConversionProcs> {
        &self.conversion_procs
    }

    /// Read the catalog and swap in a new registry snapshot. On failure the
    /// previous snapshot stays in place. An invalidation that arrives while
    /// the catalog is being read leaves the registry stale.
    pub fn refresh_enum_labels(&self) -> crate::Result<Arc<EnumCatalog>> {
        let _guard = self.refresh_lock.lock();

        let generation = self.registry.generation();
        let rows = catalog::read(&self.conn, &self.options)?;
        let catalog = self.registry.commit(EnumCatalog::from(rows), generation);

        if self.options.array_support {
            install_enum_array_procs(&catalog, &self.conversion_procs);
        }

        tracing::debug!(enums = catalog.len(), "refreshed enum labels");

        Ok(catalog)
    }

    /// Mark the registry as outdated. The next lookup reads the catalog again.
    pub fn invalidate_enum_labels(&self) {
        self.registry.invalidate();
    }

    fn ensure_fresh(&self) -> crate::Result<Arc<EnumCatalog>> {
        if self.registry.is_stale() {
            self.refresh_enum_labels()
        } else {
            Ok(self.registry.snapshot())
        }
    }

    /// The labels of the enum type with oid `type_id`, if it is one.
    pub fn enum_labels(&self, type_id: u32) -> crate::Result<Option<EnumDescriptor>> {
        Ok(self.ensure_fresh()?.lookup(type_id).cloned())
    }

    /// The columns of `table`, with `enum_values` set on every enum column
    /// whose type is known.
    pub fn schema(&self, table: &str) -> crate::Result<Vec<ColumnEntry>>
    where
        C: SchemaIntrospector,
    {
        let columns = self.conn.parse_table_schema(table)?;
        let catalog = self.ensure_fresh()?;

        Ok(schema::augment(columns, &catalog))
    }

    /// Typecast `value` for a column whose type tag is `column_type`.
    pub fn typecast_value(&self, column_type: &str, value: Value) -> crate::Result<Value> {
        let column_type = ColumnType::from_tag(column_type)
            .ok_or_else(|| ErrorKind::UnknownColumnType(column_type.to_owned()))?;

        column_type.typecast(value)
    }

    pub fn create_enum<I, V>(&self, name: impl Into<TypeName>, values: I) -> crate::Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.run_enum_ddl(&EnumDdl::create_enum(name, values))
    }

    pub fn drop_enum(&self, name: impl Into<TypeName>, options: DropEnumOptions) -> crate::Result<()> {
        self.run_enum_ddl(&EnumDdl::drop_enum(name, options))
    }

    pub fn rename_enum(&self, from: impl Into<TypeName>, to: impl Into<TypeName>) -> crate::Result<()> {
        self.run_enum_ddl(&EnumDdl::rename_enum(from, to))
    }

    pub fn rename_enum_value(
        &self,
        name: impl Into<TypeName>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> crate::Result<()> {
        self.run_enum_ddl(&EnumDdl::rename_enum_value(name, from, to))
    }

    pub fn add_enum_value(
        &self,
        name: impl Into<TypeName>,
        value: impl Into<String>,
        options: AddEnumValueOptions,
    ) -> crate::Result<()> {
        self.run_enum_ddl(&EnumDdl::add_enum_value(name, value, options))
    }

    /// Execute one DDL step and read the catalog again.
    #[tracing::instrument(skip(self), fields(operation = step.operation()))]
    pub fn run_enum_ddl(&self, step: &EnumDdl) -> crate::Result<()> {
        let sql = step.to_sql(self.options.quote_identifiers)?;

        tracing::debug!(%sql, "running enum DDL");
        self.conn.execute_raw(&sql)?;

        self.refresh_enum_labels()?;

        Ok(())
    }
}
