mod test_api;

use crate::test_api::*;
use pg_enum::*;
use pretty_assertions::assert_eq;

fn first_sql(db: &Database<std::sync::Arc<MockConnection>>) -> String {
    db.connection().sqls().into_iter().next().unwrap()
}

#[test]
fn create_enum() {
    let db = activate(MockConnection::new(), bare_options());

    db.create_enum("foo", ["a", "b", "c"]).unwrap();
    assert_eq!(first_sql(&db), "CREATE TYPE foo AS ENUM ('a', 'b', 'c')");

    db.create_enum(("sch", "foo"), ["a", "b", "c"]).unwrap();
    assert_eq!(first_sql(&db), "CREATE TYPE sch.foo AS ENUM ('a', 'b', 'c')");

    db.create_enum(TypeName::split("sch__foo"), vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        .unwrap();
    assert_eq!(first_sql(&db), "CREATE TYPE sch.foo AS ENUM ('a', 'b', 'c')");
}

#[test]
fn create_enum_quotes_identifiers_by_default() {
    let db = activate(MockConnection::new(), DatabaseOptions::default());

    db.create_enum(("sch", "Mood"), ["it's", "fine"]).unwrap();

    assert_eq!(
        first_sql(&db),
        r#"CREATE TYPE "sch"."Mood" AS ENUM ('it''s', 'fine')"#
    );
}

#[test]
fn enum_ddl_refreshes_the_registry() {
    let db = activate(MockConnection::new(), bare_options());
    assert_eq!(db.enum_labels(5).unwrap(), None);

    db.connection().set_labels(&[(5, "sad"), (5, "happy")]);
    db.create_enum("mood", ["sad", "happy"]).unwrap();

    assert_eq!(
        db.connection().sqls(),
        ["CREATE TYPE mood AS ENUM ('sad', 'happy')", LABELS_SQL]
    );
    assert_eq!(db.enum_labels(5).unwrap().unwrap().labels, ["sad", "happy"]);
}

#[test]
fn rename_enum() {
    let db = activate(MockConnection::new(), bare_options());

    db.rename_enum("foo", "bar").unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE foo RENAME TO bar");

    db.rename_enum(("sch", "foo"), ("sch", "bar")).unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE sch.foo RENAME TO sch.bar");
}

#[test]
fn rename_enum_value() {
    let db = activate(MockConnection::new(), bare_options());

    db.rename_enum_value("foo", "b", "x").unwrap();

    assert_eq!(first_sql(&db), "ALTER TYPE foo RENAME VALUE 'b' TO 'x'");
}

#[test]
fn drop_enum() {
    let db = activate(MockConnection::new(), bare_options());

    db.drop_enum("foo", DropEnumOptions::default()).unwrap();
    assert_eq!(first_sql(&db), "DROP TYPE foo");

    db.drop_enum(("sch", "foo"), DropEnumOptions::default().if_exists())
        .unwrap();
    assert_eq!(first_sql(&db), "DROP TYPE IF EXISTS sch.foo");

    db.drop_enum("foo", DropEnumOptions::default().cascade()).unwrap();
    assert_eq!(first_sql(&db), "DROP TYPE foo CASCADE");

    db.drop_enum(TypeName::split("sch__foo"), DropEnumOptions::default().if_exists())
        .unwrap();
    assert_eq!(first_sql(&db), "DROP TYPE IF EXISTS sch.foo");
}

#[test]
fn add_enum_value() {
    let db = activate(MockConnection::new(), bare_options());

    db.add_enum_value("foo", "a", AddEnumValueOptions::default()).unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE foo ADD VALUE 'a'");

    db.add_enum_value("foo", "a", AddEnumValueOptions::default().before("b"))
        .unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE foo ADD VALUE 'a' BEFORE 'b'");

    db.add_enum_value(("sch", "foo"), "a", AddEnumValueOptions::default().after("b"))
        .unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE sch.foo ADD VALUE 'a' AFTER 'b'");

    db.add_enum_value(TypeName::split("sch__foo"), "a", AddEnumValueOptions::default().after("b"))
        .unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE sch.foo ADD VALUE 'a' AFTER 'b'");

    db.add_enum_value("foo", "a", AddEnumValueOptions::default().if_not_exists())
        .unwrap();
    assert_eq!(first_sql(&db), "ALTER TYPE foo ADD VALUE IF NOT EXISTS 'a'");
}

#[test]
fn conflicting_positions_run_nothing() {
    let db = activate(MockConnection::new(), bare_options());

    let err = db
        .add_enum_value("foo", "a", AddEnumValueOptions::default().before("b").after("c"))
        .unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::ConflictingOption { .. }));
    assert_eq!(
        err.to_string(),
        "The `before` option cannot be combined with `after`"
    );
    assert!(db.connection().sqls().is_empty());
}

#[test]
fn failed_ddl_does_not_refresh() {
    let db = activate(MockConnection::new(), bare_options());
    db.connection().fail_on("DROP TYPE");

    let err = db.drop_enum("foo", DropEnumOptions::default()).unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::QueryError(_)));
    assert_eq!(db.connection().sqls(), ["DROP TYPE foo"]);
}

#[test]
fn create_enum_migration_is_reversible() {
    let db = activate(MockConnection::new(), array_options());
    let migration = Migration::change_with(|m| {
        m.create_enum("type_name", ["value1", "value2", "value3"]);
    });

    migration.apply(&db, Direction::Up).unwrap();
    assert_eq!(
        db.connection().sqls(),
        ddl_then_refresh("CREATE TYPE type_name AS ENUM ('value1', 'value2', 'value3')")
    );

    migration.apply(&db, Direction::Down).unwrap();
    assert_eq!(db.connection().sqls(), ddl_then_refresh("DROP TYPE type_name"));
}

#[test]
fn rename_enum_migration_is_reversible() {
    let db = activate(MockConnection::new(), array_options());
    let migration = Migration::change(vec![EnumDdl::rename_enum("old_type_name", "new_type_name")]);

    migration.apply(&db, Direction::Up).unwrap();
    assert_eq!(
        db.connection().sqls(),
        ddl_then_refresh("ALTER TYPE old_type_name RENAME TO new_type_name")
    );

    migration.apply(&db, Direction::Down).unwrap();
    assert_eq!(
        db.connection().sqls(),
        ddl_then_refresh("ALTER TYPE new_type_name RENAME TO old_type_name")
    );
}

#[test]
fn down_steps_run_in_reverse_order() {
    let db = activate(MockConnection::new(), bare_options());
    let migration = Migration::change_with(|m| {
        m.create_enum("mood", ["sad"]).rename_enum("mood", "feeling");
    });

    migration.apply(&db, Direction::Down).unwrap();

    assert_eq!(
        db.connection().sqls(),
        [
            "ALTER TYPE feeling RENAME TO mood",
            LABELS_SQL,
            "DROP TYPE mood",
            LABELS_SQL,
        ]
    );
}

#[test]
fn irreversible_migration_runs_nothing_on_the_way_down() {
    let db = activate(MockConnection::new(), bare_options());
    let migration = Migration::change_with(|m| {
        m.create_enum("mood", ["sad"]);
        m.rename_enum_value("mood", "sad", "blue");
    });

    let err = migration.apply(&db, Direction::Down).unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorKind::IrreversibleMigrationStep { step: "rename_enum_value" }
    ));
    assert!(db.connection().sqls().is_empty());
}

#[test]
fn explicit_down_steps_make_any_step_reversible() {
    let db = activate(MockConnection::new(), bare_options());
    let migration = Migration::new(
        vec![EnumDdl::add_enum_value(
            "mood",
            "meh",
            AddEnumValueOptions::default().after("sad"),
        )],
        vec![EnumDdl::drop_enum("mood", DropEnumOptions::default().cascade())],
    );

    migration.apply(&db, Direction::Down).unwrap();

    assert_eq!(db.connection().sqls(), ["DROP TYPE mood CASCADE", LABELS_SQL]);
}

#[test]
fn failing_step_stops_the_migration() {
    let db = activate(MockConnection::new(), bare_options());
    db.connection().fail_on("ALTER TYPE");

    let migration = Migration::change_with(|m| {
        m.create_enum("mood", ["sad"]);
        m.rename_enum("mood", "feeling");
        m.create_enum("color", ["red"]);
    });

    assert!(migration.apply(&db, Direction::Up).is_err());
    assert_eq!(
        db.connection().sqls(),
        [
            "CREATE TYPE mood AS ENUM ('sad')",
            LABELS_SQL,
            "ALTER TYPE mood RENAME TO feeling",
        ]
    );
}

#[test]
fn unrenderable_step_runs_nothing() {
    let db = activate(MockConnection::new(), bare_options());
    let migration = Migration::change_with(|m| {
        m.create_enum("mood", ["sad"]);
        m.rename_enum("mood", "feeling");
        m.add_enum_value("feeling", "meh", AddEnumValueOptions::default().before("sad").after("sad"));
    });

    let err = migration.apply(&db, Direction::Up).unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::ConflictingOption { .. }));
    assert!(db.connection().sqls().is_empty());
}
