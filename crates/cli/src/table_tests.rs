// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn render_to_string(table: &Table) -> String {
    let mut buf = Vec::new();
    table.render(&mut buf);
    String::from_utf8(buf).unwrap()
}

#[test]
fn empty_table_prints_nothing() {
    let table = Table::plain(vec![Column::left("QUEUE"), Column::right("PENDING")]);
    assert!(table.is_empty());
    assert_eq!(render_to_string(&table), "");
}

#[test]
fn columns_align_to_widest_cell() {
    let mut table = Table::plain(vec![Column::left("QUEUE"), Column::right("PENDING")]);
    table.row(vec!["mail".into(), "5".into()]);
    table.row(vec!["high-priority".into(), "1234".into()]);

    assert_eq!(
        render_to_string(&table),
        "QUEUE          PENDING\n\
         mail                 5\n\
         high-priority     1234\n"
    );
}

#[test]
fn last_left_column_is_not_padded() {
    let mut table = Table::plain(vec![Column::left("WORKER"), Column::left("STATE")]);
    table.row(vec!["h:1:q".into(), "idle".into()]);
    table.row(vec!["h:22:q".into(), "working".into()]);
    let out = render_to_string(&table);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["WORKER  STATE", "h:1:q   idle", "h:22:q  working"]);
}

#[test]
fn max_width_truncates() {
    let mut table = Table::plain(vec![Column::left("ERROR").with_max(5), Column::left("X")]);
    table.row(vec!["connection refused".into(), "y".into()]);
    let out = render_to_string(&table);
    assert_eq!(out.lines().nth(1), Some("conne  y"));
}

#[test]
fn missing_cells_render_empty() {
    let mut table = Table::plain(vec![Column::left("A"), Column::left("B")]);
    table.row(vec!["x".into()]);
    assert_eq!(render_to_string(&table).lines().nth(1), Some("x  "));
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate("héllo", Some(2)), "hé");
    assert_eq!(truncate("abc", Some(10)), "abc");
    assert_eq!(truncate("abc", None), "abc");
}
