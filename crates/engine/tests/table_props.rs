// Property tests for table mutations.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use csvsh_engine::{Table, TableError};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// A rectangular table with distinct column names `c0..cN`.
fn arb_table() -> impl Strategy<Value = Table> {
    (1usize..6, 0usize..8).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec("[a-z0-9]{0,4}", cols), rows).prop_map(
            move |rows| {
                let header = (0..cols).map(|i| format!("c{}", i)).collect();
                Table::from_parts(header, rows)
            },
        )
    })
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn delete_column_keeps_rows_in_lock_step(table in arb_table(), pick in 0usize..6) {
        let mut t = table.clone();
        let name = format!("c{}", pick);
        let result = t.delete_column(&name);
        if pick < table.column_count() {
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(t.column_count(), table.column_count() - 1);
            for row in t.rows() {
                prop_assert_eq!(row.len(), t.column_count());
            }
        } else {
            prop_assert_eq!(result, Err(TableError::NotFound { column: name }));
            prop_assert_eq!(t, table);
        }
    }

    #[test]
    fn switch_rows_twice_restores(table in arb_table(), a in 0usize..8, b in 0usize..8) {
        let mut t = table.clone();
        let (a, b) = (a.to_string(), b.to_string());
        if t.switch_rows(&a, &b).is_ok() {
            t.switch_rows(&a, &b).unwrap();
        }
        prop_assert_eq!(t, table);
    }

    #[test]
    fn switch_columns_keeps_header(table in arb_table(), a in 0usize..6, b in 0usize..6) {
        let mut t = table.clone();
        let _ = t.switch_columns(&format!("c{}", a), &format!("c{}", b));
        prop_assert_eq!(t.header(), table.header());
        prop_assert_eq!(t.row_count(), table.row_count());
    }

    #[test]
    fn set_then_get_returns_content(table in arb_table(), col in 0usize..6, row in 0usize..8, content in "[a-z]{1,5}") {
        let mut t = table.clone();
        let (name, token) = (format!("c{}", col), row.to_string());
        match t.set_cell(&name, &token, &content) {
            Ok(()) => prop_assert_eq!(t.get_cell(&name, &token), Ok(content.as_str())),
            Err(_) => prop_assert_eq!(t, table),
        }
    }

    #[test]
    fn snapshot_numbers_every_row(table in arb_table()) {
        let snap = table.snapshot();
        prop_assert_eq!(snap.columns.len(), table.column_count() + 1);
        for (i, row) in snap.rows.iter().enumerate() {
            prop_assert_eq!(&row[0], &i.to_string());
        }
    }
}
