use serde::Deserialize;

/// The first server version whose `pg_enum` has an `enumsortorder` column.
pub(crate) const SORT_ORDER_MIN_VERSION: u32 = 90100;

/// Settings for a [`Database`](struct.Database.html) handle.
///
/// ```
/// # use pg_enum::DatabaseOptions;
/// let options = DatabaseOptions::default()
///     .with_array_support(true)
///     .with_quoted_identifiers(false);
///
/// assert!(options.array_support);
/// assert!(!options.quote_identifiers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseOptions {
    /// Double-quote type names in generated DDL.
    pub quote_identifiers: bool,
    /// Whether array values are parsed at all. When off, the array type
    /// catalog is never queried and no array conversion procedures are
    /// installed.
    pub array_support: bool,
    /// Servers at or above this version order labels by `enumsortorder`.
    pub sort_order_min_version: u32,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            quote_identifiers: true,
            array_support: false,
            sort_order_min_version: SORT_ORDER_MIN_VERSION,
        }
    }
}

impl DatabaseOptions {
    pub fn with_array_support(mut self, enabled: bool) -> Self {
        self.array_support = enabled;
        self
    }

    pub fn with_quoted_identifiers(mut self, quoted: bool) -> Self {
        self.quote_identifiers = quoted;
        self
    }
}
