//! Enum DDL intents and their SQL.

use crate::{Error, TypeName};
use sql_ddl::postgres::{self as ddl, AlterTypeClause, EnumValuePosition, PostgresIdentifier};
use std::{borrow::Cow, fmt::Display};

/// Options for `DROP TYPE`. Both may be combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropEnumOptions {
    pub if_exists: bool,
    pub cascade: bool,
}

impl DropEnumOptions {
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }
}

/// Options for `ALTER TYPE ... ADD VALUE`. `before` and `after` are mutually
/// exclusive; either may be combined with `if_not_exists`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddEnumValueOptions {
    pub if_not_exists: bool,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl AddEnumValueOptions {
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn before(mut self, neighbor: impl Into<String>) -> Self {
        self.before = Some(neighbor.into());
        self
    }

    pub fn after(mut self, neighbor: impl Into<String>) -> Self {
        self.after = Some(neighbor.into());
        self
    }

    fn position(&self) -> crate::Result<Option<EnumValuePosition<'_>>> {
        match (&self.before, &self.after) {
            (Some(_), Some(_)) => Err(Error::conflicting_option("before", "after")),
            (Some(before), None) => Ok(Some(EnumValuePosition::Before(Cow::Borrowed(before)))),
            (None, Some(after)) => Ok(Some(EnumValuePosition::After(Cow::Borrowed(after)))),
            (None, None) => Ok(None),
        }
    }
}

/// One schema change to an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumDdl {
    CreateEnum {
        name: TypeName,
        values: Vec<String>,
    },
    DropEnum {
        name: TypeName,
        options: DropEnumOptions,
    },
    RenameEnum {
        from: TypeName,
        to: TypeName,
    },
    RenameEnumValue {
        name: TypeName,
        from: String,
        to: String,
    },
    AddEnumValue {
        name: TypeName,
        value: String,
        options: AddEnumValueOptions,
    },
}

impl EnumDdl {
    pub fn create_enum<I, V>(name: impl Into<TypeName>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        EnumDdl::CreateEnum {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn drop_enum(name: impl Into<TypeName>, options: DropEnumOptions) -> Self {
        EnumDdl::DropEnum {
            name: name.into(),
            options,
        }
    }

    pub fn rename_enum(from: impl Into<TypeName>, to: impl Into<TypeName>) -> Self {
        EnumDdl::RenameEnum {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn rename_enum_value(name: impl Into<TypeName>, from: impl Into<String>, to: impl Into<String>) -> Self {
        EnumDdl::RenameEnumValue {
            name: name.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn add_enum_value(name: impl Into<TypeName>, value: impl Into<String>, options: AddEnumValueOptions) -> Self {
        EnumDdl::AddEnumValue {
            name: name.into(),
            value: value.into(),
            options,
        }
    }

    /// The name of the operation, as used in error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            EnumDdl::CreateEnum { .. } => "create_enum",
            EnumDdl::DropEnum { .. } => "drop_enum",
            EnumDdl::RenameEnum { .. } => "rename_enum",
            EnumDdl::RenameEnumValue { .. } => "rename_enum_value",
            EnumDdl::AddEnumValue { .. } => "add_enum_value",
        }
    }

    /// Render the statement. Option conflicts are reported here, before any
    /// SQL exists.
    ///
    /// ```
    /// # use pg_enum::{EnumDdl, DropEnumOptions};
    /// let drop = EnumDdl::drop_enum("foo", DropEnumOptions::default().cascade());
    /// assert_eq!(drop.to_sql(false).unwrap(), "DROP TYPE foo CASCADE");
    /// ```
    pub fn to_sql(&self, quote_identifiers: bool) -> crate::Result<String> {
        let sql = match self {
            EnumDdl::CreateEnum { name, values } => {
                let ident = name.to_identifier();
                let enum_name = type_name(&ident, quote_identifiers);
                let statement = ddl::CreateEnum {
                    enum_name: enum_name.as_display(),
                    variants: values.iter().map(|v| Cow::Borrowed(v.as_str())).collect(),
                };

                statement.to_string()
            }
            EnumDdl::DropEnum { name, options } => {
                let ident = name.to_identifier();
                let type_name = type_name(&ident, quote_identifiers);
                let statement = ddl::DropType {
                    type_name: type_name.as_display(),
                    if_exists: options.if_exists,
                    cascade: options.cascade,
                };

                statement.to_string()
            }
            EnumDdl::RenameEnum { from, to } => {
                let (from, to) = (from.to_identifier(), to.to_identifier());
                let (from, to) = (type_name(&from, quote_identifiers), type_name(&to, quote_identifiers));
                let statement = ddl::AlterType {
                    type_name: from.as_display(),
                    clause: AlterTypeClause::RenameTo(to.as_display()),
                };

                statement.to_string()
            }
            EnumDdl::RenameEnumValue { name, from, to } => {
                let ident = name.to_identifier();
                let type_name = type_name(&ident, quote_identifiers);
                let statement = ddl::AlterType {
                    type_name: type_name.as_display(),
                    clause: AlterTypeClause::RenameValue {
                        from: Cow::Borrowed(from),
                        to: Cow::Borrowed(to),
                    },
                };

                statement.to_string()
            }
            EnumDdl::AddEnumValue { name, value, options } => {
                let position = options.position()?;
                let ident = name.to_identifier();
                let type_name = type_name(&ident, quote_identifiers);
                let statement = ddl::AlterType {
                    type_name: type_name.as_display(),
                    clause: AlterTypeClause::AddValue {
                        value: Cow::Borrowed(value),
                        if_not_exists: options.if_not_exists,
                        position,
                    },
                };

                statement.to_string()
            }
        };

        Ok(sql)
    }

    /// The step that undoes this one: `create_enum` becomes a plain
    /// `drop_enum`, `rename_enum` swaps its names. Everything else loses
    /// information and cannot be reversed.
    pub fn reverse(&self) -> crate::Result<EnumDdl> {
        match self {
            EnumDdl::CreateEnum { name, .. } => Ok(EnumDdl::drop_enum(name, DropEnumOptions::default())),
            EnumDdl::RenameEnum { from, to } => Ok(EnumDdl::rename_enum(to, from)),
            EnumDdl::DropEnum { .. } | EnumDdl::RenameEnumValue { .. } | EnumDdl::AddEnumValue { .. } => {
                Err(Error::irreversible(self.operation()))
            }
        }
    }
}

enum RenderedName<'b, 'a> {
    Quoted(&'b PostgresIdentifier<'a>),
    Bare(ddl::BareIdentifier<'b, 'a>),
}

impl RenderedName<'_, '_> {
    fn as_display(&self) -> &dyn Display {
        match self {
            RenderedName::Quoted(ident) => *ident,
            RenderedName::Bare(bare) => bare,
        }
    }
}

fn type_name<'b, 'a>(ident: &'b PostgresIdentifier<'a>, quote_identifiers: bool) -> RenderedName<'b, 'a> {
    if quote_identifiers {
        RenderedName::Quoted(ident)
    } else {
        RenderedName::Bare(ident.bare())
    }
}
