// ABOUTME: Unit tests for schema compilation and SQL template rendering
// ABOUTME: Validates the primary-key invariant, placeholder counts, and identifier quoting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use tablemap::{Error, Field, TableSchema};

fn student_schema() -> TableSchema {
    TableSchema::compile(
        "Student",
        vec![
            ("SId", Field::integer().primary_key()),
            ("Sname", Field::string()),
            ("Sage", Field::string()),
            ("Ssex", Field::string()),
        ],
    )
    .unwrap()
}

#[test]
fn test_templates_render_exactly() {
    let schema = student_schema();
    assert_eq!(
        schema.select_sql(),
        "select `SId`, `Sname`, `Sage`, `Ssex` from `Student`"
    );
    assert_eq!(
        schema.insert_sql(),
        "insert into `Student` (`Sname`, `Sage`, `Ssex`, `SId`) values (?, ?, ?, ?)"
    );
    assert_eq!(
        schema.update_sql(),
        "update `Student` set `Sname`=?, `Sage`=?, `Ssex`=? where `SId`=?"
    );
    assert_eq!(schema.delete_sql(), "delete from `Student` where `SId`=?");
}

#[test]
fn test_insert_has_field_count_placeholders_with_pk_last() {
    // N non-key fields -> N+1 placeholders, primary key listed last.
    for n in 0..5 {
        let mut declared = vec![("id".to_owned(), Field::integer().primary_key())];
        for i in 0..n {
            declared.push((format!("f{i}"), Field::string()));
        }
        let schema = TableSchema::compile("t", declared).unwrap();
        assert_eq!(schema.insert_sql().matches('?').count(), n + 1);
        let columns_end = schema.insert_sql().find(") values").unwrap();
        assert!(schema.insert_sql()[..columns_end].ends_with("`id`"));
    }
}

#[test]
fn test_duplicate_primary_key_fails() {
    let result = TableSchema::compile(
        "t",
        vec![
            ("a", Field::integer().primary_key()),
            ("b", Field::integer().primary_key()),
        ],
    );
    match result {
        Err(Error::DuplicatePrimaryKey { field }) => assert_eq!(field, "b"),
        other => panic!("expected DuplicatePrimaryKey, got {other:?}"),
    }
}

#[test]
fn test_missing_primary_key_fails() {
    let result = TableSchema::compile("t", vec![("a", Field::string()), ("b", Field::text())]);
    match result {
        Err(Error::MissingPrimaryKey { table }) => assert_eq!(table, "t"),
        other => panic!("expected MissingPrimaryKey, got {other:?}"),
    }
}

#[test]
fn test_column_alias_applies_only_to_update_set_clause() {
    let schema = TableSchema::compile(
        "t",
        vec![
            ("id", Field::integer().primary_key()),
            ("name", Field::string().named("display_name")),
        ],
    )
    .unwrap();
    // SELECT and INSERT keep the declaration key; UPDATE honors the alias.
    assert_eq!(schema.select_sql(), "select `id`, `name` from `t`");
    assert_eq!(
        schema.insert_sql(),
        "insert into `t` (`name`, `id`) values (?, ?)"
    );
    assert_eq!(
        schema.update_sql(),
        "update `t` set `display_name`=? where `id`=?"
    );
}

#[test]
fn test_reserved_words_are_quoted() {
    let schema = TableSchema::compile(
        "order",
        vec![
            ("select", Field::integer().primary_key()),
            ("group", Field::string()),
        ],
    )
    .unwrap();
    assert_eq!(schema.select_sql(), "select `select`, `group` from `order`");
    assert_eq!(schema.delete_sql(), "delete from `order` where `select`=?");
}

#[test]
fn test_declaration_order_is_preserved() {
    let schema = TableSchema::compile(
        "t",
        vec![
            ("z", Field::string()),
            ("id", Field::integer().primary_key()),
            ("a", Field::string()),
            ("m", Field::string()),
        ],
    )
    .unwrap();
    let names: Vec<&str> = schema.fields().iter().map(String::as_str).collect();
    assert_eq!(names, ["z", "a", "m"]);
    assert_eq!(schema.primary_key(), "id");
}

#[test]
fn test_field_metadata_is_reachable_from_the_schema() {
    let schema = student_schema();
    assert_eq!(schema.table_name(), "Student");
    assert_eq!(schema.field("SId").unwrap().sql_type(), "bigint");
    assert!(schema.field("SId").unwrap().is_primary_key());
    assert!(schema.field("nope").is_none());
}
