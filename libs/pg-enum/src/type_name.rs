use sql_ddl::postgres::PostgresIdentifier;
use std::fmt::{self, Display};

/// The name of a type, optionally qualified with its schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    pub schema: Option<String>,
    pub name: String,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Read `schema__name` as a qualified name. Anything without a double
    /// underscore is a plain name.
    ///
    /// ```
    /// # use pg_enum::TypeName;
    /// assert_eq!(TypeName::split("sch__foo"), TypeName::qualified("sch", "foo"));
    /// assert_eq!(TypeName::split("foo"), TypeName::new("foo"));
    /// ```
    pub fn split(s: &str) -> Self {
        match s.split_once("__") {
            Some((schema, name)) if !schema.is_empty() && !name.is_empty() => Self::qualified(schema, name),
            _ => Self::new(s),
        }
    }

    pub(crate) fn to_identifier(&self) -> PostgresIdentifier<'_> {
        PostgresIdentifier::new(self.schema.as_deref(), &self.name)
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_identifier().bare().fmt(f)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, &str)> for TypeName {
    fn from((schema, name): (&str, &str)) -> Self {
        Self::qualified(schema, name)
    }
}

impl From<&TypeName> for TypeName {
    fn from(name: &TypeName) -> Self {
        name.clone()
    }
}
