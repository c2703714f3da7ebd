use crate::common::{write_escaped, IteratorJoin};
use std::{borrow::Cow, fmt::Display};

/// Render a `CREATE TYPE ... AS ENUM` statement.
///
/// ```
/// # use sql_ddl::postgres::{CreateEnum, PostgresIdentifier};
///
/// let name = PostgresIdentifier::from("mood");
/// let create_enum = CreateEnum {
///     enum_name: &name,
///     variants: vec!["sad".into(), "ok".into(), "happy".into()],
/// };
///
/// assert_eq!(create_enum.to_string(), r#"CREATE TYPE "mood" AS ENUM ('sad', 'ok', 'happy')"#);
/// ```
pub struct CreateEnum<'a> {
    pub enum_name: &'a dyn Display,
    pub variants: Vec<Cow<'a, str>>,
}

impl Display for CreateEnum<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CREATE TYPE {enum_name} AS ENUM (", enum_name = self.enum_name)?;
        self.variants.iter().map(|s| StrLit(s)).join(", ", f)?;
        f.write_str(")")
    }
}

/// Render a `DROP TYPE` statement.
///
/// ```
/// # use sql_ddl::postgres::{DropType, PostgresIdentifier};
///
/// let name = PostgresIdentifier::from("CatMood");
///
/// let drop_type = DropType { type_name: &name, if_exists: false, cascade: false };
/// assert_eq!(drop_type.to_string(), r#"DROP TYPE "CatMood""#);
///
/// let drop_type = DropType { type_name: &name, if_exists: true, cascade: true };
/// assert_eq!(drop_type.to_string(), r#"DROP TYPE IF EXISTS "CatMood" CASCADE"#);
/// ```
pub struct DropType<'a> {
    /// The name of the type to be dropped.
    pub type_name: &'a dyn Display,
    pub if_exists: bool,
    pub cascade: bool,
}

impl Display for DropType<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DROP TYPE ")?;

        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }

        self.type_name.fmt(f)?;

        if self.cascade {
            f.write_str(" CASCADE")?;
        }

        Ok(())
    }
}

/// Render an `ALTER TYPE` statement with a single clause.
pub struct AlterType<'a> {
    pub type_name: &'a dyn Display,
    pub clause: AlterTypeClause<'a>,
}

impl Display for AlterType<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ALTER TYPE ")?;
        self.type_name.fmt(f)?;
        f.write_str(" ")?;
        self.clause.fmt(f)
    }
}

pub enum AlterTypeClause<'a> {
    /// `RENAME TO <new name>`
    RenameTo(&'a dyn Display),
    /// `RENAME VALUE '<from>' TO '<to>'`
    RenameValue { from: Cow<'a, str>, to: Cow<'a, str> },
    /// `ADD VALUE [IF NOT EXISTS] '<value>' [BEFORE|AFTER '<neighbor>']`
    AddValue {
        value: Cow<'a, str>,
        if_not_exists: bool,
        position: Option<EnumValuePosition<'a>>,
    },
}

impl Display for AlterTypeClause<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlterTypeClause::RenameTo(to) => {
                f.write_str("RENAME TO ")?;
                to.fmt(f)
            }
            AlterTypeClause::RenameValue { from, to } => {
                write!(f, "RENAME VALUE {} TO {}", StrLit(from), StrLit(to))
            }
            AlterTypeClause::AddValue {
                value,
                if_not_exists,
                position,
            } => {
                f.write_str("ADD VALUE ")?;

                if *if_not_exists {
                    f.write_str("IF NOT EXISTS ")?;
                }

                StrLit(value).fmt(f)?;

                if let Some(position) = position {
                    f.write_str(" ")?;
                    position.fmt(f)?;
                }

                Ok(())
            }
        }
    }
}

/// Where a new value goes relative to an existing one. Without a position,
/// PostgreSQL appends the value at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValuePosition<'a> {
    Before(Cow<'a, str>),
    After(Cow<'a, str>),
}

impl Display for EnumValuePosition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumValuePosition::Before(neighbor) => write!(f, "BEFORE {}", StrLit(neighbor)),
            EnumValuePosition::After(neighbor) => write!(f, "AFTER {}", StrLit(neighbor)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostgresIdentifier<'a> {
    /// Simple identifier without a schema(namespace).
    Simple(Cow<'a, str>),
    /// Identifier with a schema(namespace). The first field is the schema.
    WithSchema(Cow<'a, str>, Cow<'a, str>),
}

impl<'a> PostgresIdentifier<'a> {
    pub fn new(namespace: Option<&'a str>, name: &'a str) -> Self {
        match namespace {
            Some(ns) => PostgresIdentifier::WithSchema(ns.into(), name.into()),
            None => PostgresIdentifier::Simple(name.into()),
        }
    }

    /// Render without double quotes, for connections that do not quote
    /// identifiers.
    pub fn bare(&self) -> BareIdentifier<'_, 'a> {
        BareIdentifier(self)
    }
}

impl Default for PostgresIdentifier<'_> {
    fn default() -> Self {
        PostgresIdentifier::Simple(Cow::Borrowed(""))
    }
}

impl<'a> From<&'a str> for PostgresIdentifier<'a> {
    fn from(s: &'a str) -> Self {
        PostgresIdentifier::Simple(Cow::Borrowed(s))
    }
}

impl<'a> From<(&'a str, &'a str)> for PostgresIdentifier<'a> {
    fn from((schema, item): (&'a str, &'a str)) -> Self {
        PostgresIdentifier::WithSchema(Cow::Borrowed(schema), Cow::Borrowed(item))
    }
}

impl Display for PostgresIdentifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let delimiter = '"';

        match self {
            PostgresIdentifier::Simple(name) => write_escaped(f, name, delimiter),
            PostgresIdentifier::WithSchema(prefix, name) => {
                write_escaped(f, prefix, delimiter)?;
                f.write_str(".")?;
                write_escaped(f, name, delimiter)
            }
        }
    }
}

/// See [PostgresIdentifier::bare](enum.PostgresIdentifier.html#method.bare).
#[derive(Debug)]
pub struct BareIdentifier<'b, 'a>(&'b PostgresIdentifier<'a>);

impl Display for BareIdentifier<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            PostgresIdentifier::Simple(name) => f.write_str(name),
            PostgresIdentifier::WithSchema(prefix, name) => write!(f, "{prefix}.{name}"),
        }
    }
}

/// A single-quoted string literal.
pub struct StrLit<'a>(pub &'a str);

impl Display for StrLit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_escaped(f, self.0, '\'')
    }
}
