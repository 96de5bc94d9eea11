//! Applies a [`QueryDescriptor`] to the sample store's snapshot:
//! filter, sort, project, format.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::storage::SensorRecord;

use super::descriptor::{Column, ColumnSet, QueryDescriptor};

/// Numeric view of one column of a record, shared by filtering, sorting,
/// and projection. Booleans map to 0/1.
fn column_value(record: &SensorRecord, column: Column) -> u64 {
    match column {
        Column::Time => record.timestamp,
        Column::Potentiometer => record.potentiometer as u64,
        Column::Button => record.button as u64,
        Column::Led => record.led as u64,
    }
}

/// Run one query against a snapshot of the store.
///
/// The result is the full reply text: one header line naming the selected
/// columns, then one line per surviving record, every line
/// newline-terminated. An empty result set yields the header only; an
/// empty column selection yields empty lines.
pub fn execute(descriptor: &QueryDescriptor, snapshot: &[SensorRecord]) -> String {
    // Filter: a true compacted selection. Matches keep their relative
    // order and close ranks, rather than being written back at their
    // original sparse indices.
    let mut rows: Vec<SensorRecord> = match descriptor.filter {
        Some(filter) => snapshot
            .iter()
            .copied()
            .filter(|record| {
                filter
                    .op
                    .evaluate(column_value(record, filter.column), filter.value)
            })
            .collect(),
        None => snapshot.to_vec(),
    };

    // Order: exactly one key, ascending. The sort is unstable, so the
    // order among equal keys is unspecified (but fixed within one run).
    if let Some(key) = descriptor.order_by.sort_key() {
        rows.sort_unstable_by_key(|record| column_value(record, key));
    }

    project(descriptor.selected, &rows)
}

/// Emit the header and rows for the selected columns, in the fixed order
/// time, potv, butp, ledo.
fn project(selected: ColumnSet, rows: &[SensorRecord]) -> String {
    let mut out = String::new();

    let mut first = true;
    for column in Column::ALL {
        if selected.contains(column) {
            if !first {
                out.push(',');
            }
            out.push_str(column.token());
            first = false;
        }
    }
    out.push('\n');

    for record in rows {
        let mut first = true;
        for column in Column::ALL {
            if selected.contains(column) {
                if !first {
                    out.push(',');
                }
                // Writing into a String cannot fail.
                let _ = write!(out, "{}", column_value(record, column));
                first = false;
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::compiler::compile;
    use crate::query::descriptor::{CompareOp, Filter};

    fn snapshot() -> [SensorRecord; 3] {
        [
            SensorRecord::new(100, 10, false, true),
            SensorRecord::new(200, 20, true, true),
            SensorRecord::new(300, 30, false, true),
        ]
    }

    #[test]
    fn test_filter_compacts_and_preserves_order() {
        let reply = execute(&compile(b"SELECT potv WHERE potv>15"), &snapshot());
        assert_eq!(reply, "potv\n20\n30\n");
    }

    #[test]
    fn test_all_operators_filter_correctly() {
        let records = snapshot();
        let cases = [
            (CompareOp::Lt, vec![10u64]),
            (CompareOp::Gt, vec![30]),
            (CompareOp::Eq, vec![20]),
            (CompareOp::Le, vec![10, 20]),
            (CompareOp::Ge, vec![20, 30]),
            (CompareOp::Ne, vec![10, 30]),
        ];
        for (op, expected) in cases {
            let descriptor = QueryDescriptor {
                selected: ColumnSet::ALL,
                filter: Some(Filter {
                    column: Column::Potentiometer,
                    op,
                    value: 20,
                }),
                order_by: ColumnSet::EMPTY,
            };
            let survivors: Vec<u64> = records
                .iter()
                .filter(|r| op.evaluate(column_value(r, Column::Potentiometer), 20))
                .map(|r| column_value(r, Column::Potentiometer))
                .collect();
            assert_eq!(survivors, expected, "operator {op:?}");
            // The formatted reply has one row per survivor.
            let reply = execute(&descriptor, &records);
            assert_eq!(reply.lines().count(), 1 + expected.len());
        }
    }

    #[test]
    fn test_order_by_button_groups_false_before_true() {
        let reply = execute(&compile(b"SELECT * ORDER BY butp"), &snapshot());
        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines[0], "time,potv,butp,ledo");
        // Both button=false rows precede the button=true row; their mutual
        // order is unspecified by the unstable sort.
        assert!(lines[1].ends_with(",0,1"));
        assert!(lines[2].ends_with(",0,1"));
        assert!(lines[3].ends_with(",1,1"));
    }

    #[test]
    fn test_order_by_precedence_ignores_lower_columns() {
        // BUTTON outranks TIME, so timestamps stay unsorted inside the
        // button groups.
        let records = [
            SensorRecord::new(300, 1, true, true),
            SensorRecord::new(100, 2, false, true),
        ];
        let reply = execute(&compile(b"SELECT time ORDER BY butp,time"), &records);
        assert_eq!(reply, "time\n100\n300\n");
    }

    #[test]
    fn test_star_header_round_trips_canonical_columns() {
        let reply = execute(&compile(b"SELECT *"), &snapshot());
        let header = reply.lines().next().unwrap();
        assert_eq!(header, "time,potv,butp,ledo");
    }

    #[test]
    fn test_empty_result_set_prints_header_only() {
        let reply = execute(&compile(b"SELECT potv WHERE potv>9999"), &snapshot());
        assert_eq!(reply, "potv\n");
    }

    #[test]
    fn test_degenerate_select_prints_empty_header_and_rows() {
        let reply = execute(&compile(b"SELECT zzz"), &snapshot());
        assert_eq!(reply, "\n\n\n\n");
    }

    #[test]
    fn test_empty_snapshot_yields_header_only() {
        let reply = execute(&compile(b"SELECT *"), &[]);
        assert_eq!(reply, "time,potv,butp,ledo\n");
    }

    #[test]
    fn test_full_projection_renders_booleans_as_digits() {
        let records = [SensorRecord::new(5, 7, true, true)];
        let reply = execute(&compile(b"SELECT *"), &records);
        assert_eq!(reply, "time,potv,butp,ledo\n5,7,1,1\n");
    }
}
