use crate::{AddEnumValueOptions, Database, DropEnumOptions, EnumDdl, TypeName};
use sql_connection::SyncSqlConnection;
use std::fmt;

/// Which way a migration runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// A list of enum DDL steps with a way back.
///
/// A `change` migration derives its down steps by reversing every up step in
/// reverse order. Steps without an inverse make the down direction fail
/// before anything runs. A migration built with explicit down steps runs
/// them as given.
///
/// ```
/// # use pg_enum::{Direction, EnumDdl, Migration};
/// let migration = Migration::change_with(|m| {
///     m.create_enum("mood", ["sad", "happy"]);
///     m.rename_enum("mood", "feeling");
/// });
///
/// assert_eq!(
///     migration.steps(Direction::Down).unwrap(),
///     vec![
///         EnumDdl::rename_enum("feeling", "mood"),
///         EnumDdl::drop_enum("mood", Default::default()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    up: Vec<EnumDdl>,
    down: Option<Vec<EnumDdl>>,
}

impl Migration {
    /// A migration whose down direction is derived from `up`.
    pub fn change(up: Vec<EnumDdl>) -> Self {
        Self { up, down: None }
    }

    /// Record the up steps with a [`MigrationSteps`] builder.
    pub fn change_with(f: impl FnOnce(&mut MigrationSteps)) -> Self {
        let mut steps = MigrationSteps::default();
        f(&mut steps);

        Self::change(steps.into_steps())
    }

    /// A migration with explicit steps for both directions.
    pub fn new(up: Vec<EnumDdl>, down: Vec<EnumDdl>) -> Self {
        Self { up, down: Some(down) }
    }

    /// The steps to run for `direction`, in execution order.
    pub fn steps(&self, direction: Direction) -> crate::Result<Vec<EnumDdl>> {
        match (direction, &self.down) {
            (Direction::Up, _) => Ok(self.up.clone()),
            (Direction::Down, Some(down)) => Ok(down.clone()),
            (Direction::Down, None) => self.up.iter().rev().map(EnumDdl::reverse).collect(),
        }
    }

    /// Run the migration against `db`. Every step is rendered first, so a
    /// step that cannot be expressed fails the migration before anything
    /// runs. Each step refreshes the registry as it goes. When a step fails
    /// on the server, the steps before it stay applied.
    #[tracing::instrument(skip(self, db))]
    pub fn apply<C>(&self, db: &Database<C>, direction: Direction) -> crate::Result<()>
    where
        C: SyncSqlConnection,
    {
        let steps = self.steps(direction)?;

        for step in &steps {
            step.to_sql(db.options().quote_identifiers)?;
        }

        for step in &steps {
            db.run_enum_ddl(step)?;
        }

        tracing::debug!(steps = steps.len(), "applied enum migration");

        Ok(())
    }
}

/// Records enum DDL steps in order.
#[derive(Debug, Default)]
pub struct MigrationSteps {
    steps: Vec<EnumDdl>,
}

impl MigrationSteps {
    pub fn create_enum<I, V>(&mut self, name: impl Into<TypeName>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.push(EnumDdl::create_enum(name, values))
    }

    pub fn drop_enum(&mut self, name: impl Into<TypeName>, options: DropEnumOptions) -> &mut Self {
        self.push(EnumDdl::drop_enum(name, options))
    }

    pub fn rename_enum(&mut self, from: impl Into<TypeName>, to: impl Into<TypeName>) -> &mut Self {
        self.push(EnumDdl::rename_enum(from, to))
    }

    pub fn rename_enum_value(
        &mut self,
        name: impl Into<TypeName>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> &mut Self {
        self.push(EnumDdl::rename_enum_value(name, from, to))
    }

    pub fn add_enum_value(
        &mut self,
        name: impl Into<TypeName>,
        value: impl Into<String>,
        options: AddEnumValueOptions,
    ) -> &mut Self {
        self.push(EnumDdl::add_enum_value(name, value, options))
    }

    pub fn push(&mut self, step: EnumDdl) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn into_steps(self) -> Vec<EnumDdl> {
        self.steps
    }
}
