//! Hand-written scanner that turns a SELECT line into a
//! [`QueryDescriptor`].
//!
//! One left-to-right pass over the bytes, with three modes: reading the
//! select list, reading the WHERE clause, reading the ORDER BY list.
//! Mode switches happen when the literal substrings ` WHERE` or
//! ` ORDER BY` appear at the scan position. Any byte no mode recognizes
//! is skipped, one at a time; the scanner therefore always terminates
//! and never rejects a line. Malformed input degrades to a best-effort
//! descriptor built from whatever tokens were recognized, and clients
//! depend on that tolerance.

use super::descriptor::{Column, ColumnSet, CompareOp, Filter, QueryDescriptor};

/// Length of the leading `SELECT` keyword.
pub const SELECT_LEN: usize = 6;

/// Column tokens (`time`, `potv`, `butp`, `ledo`) are exactly this long
/// and disambiguated by their first letter.
const COLUMN_TOKEN_LEN: usize = 4;

/// Whether `line` is a query: first six bytes exactly `SELECT`, with at
/// least one byte after them.
pub fn is_select(line: &[u8]) -> bool {
    line.len() > SELECT_LEN && line.starts_with(b"SELECT")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SelectList,
    Where,
    OrderBy,
}

/// First-letter column lookup shared by all three modes.
fn column_for(byte: u8) -> Option<Column> {
    match byte {
        b't' => Some(Column::Time),
        b'p' => Some(Column::Potentiometer),
        b'b' => Some(Column::Button),
        b'l' => Some(Column::Led),
        _ => None,
    }
}

/// Compile one SELECT line. The caller guarantees [`is_select`] held for
/// `line`; anything after the keyword is scanned permissively.
pub fn compile(line: &[u8]) -> QueryDescriptor {
    let mut descriptor = QueryDescriptor::default();

    // WHERE clause parts accumulate separately; the filter only exists if
    // both a column and an operator were recognized. A clause naming an
    // unknown column (or none) yields no filter at all.
    let mut filter_column: Option<Column> = None;
    let mut filter_op: Option<CompareOp> = None;
    let mut filter_value: u64 = 0;

    let mut mode = Mode::SelectList;
    let mut i = SELECT_LEN;

    while i < line.len() {
        if line[i..].starts_with(b" WHERE") {
            mode = Mode::Where;
            i += b" WHERE".len();
            continue;
        }
        if line[i..].starts_with(b" ORDER BY") {
            mode = Mode::OrderBy;
            i += b" ORDER BY".len();
            continue;
        }

        match mode {
            Mode::SelectList => {
                if line[i] == b'*' {
                    descriptor.selected = ColumnSet::ALL;
                    i += 1;
                } else if let Some(column) = column_for(line[i]) {
                    descriptor.selected.insert(column);
                    i += COLUMN_TOKEN_LEN;
                } else {
                    i += 1;
                }
            }
            Mode::Where => match line[i] {
                b'<' | b'>' => {
                    let base = if line[i] == b'<' {
                        CompareOp::Lt
                    } else {
                        CompareOp::Gt
                    };
                    if line.get(i + 1) == Some(&b'=') {
                        filter_op = Some(base.with_equals());
                        i += 2;
                    } else {
                        filter_op = Some(base);
                        i += 1;
                    }
                }
                b'=' => {
                    filter_op = Some(CompareOp::Eq);
                    i += 1;
                }
                b'!' => {
                    // A lone `!` is not an operator; only `!=` is.
                    if line.get(i + 1) == Some(&b'=') {
                        filter_op = Some(CompareOp::Ne);
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                b'0'..=b'9' => {
                    // Decimal digits accumulate left-to-right, saturating
                    // at the type maximum rather than wrapping.
                    filter_value = filter_value
                        .saturating_mul(10)
                        .saturating_add((line[i] - b'0') as u64);
                    i += 1;
                }
                byte => {
                    if let Some(column) = column_for(byte) {
                        filter_column = Some(column);
                        i += COLUMN_TOKEN_LEN;
                    } else {
                        i += 1;
                    }
                }
            },
            Mode::OrderBy => {
                if let Some(column) = column_for(line[i]) {
                    descriptor.order_by.insert(column);
                    i += COLUMN_TOKEN_LEN;
                } else {
                    i += 1;
                }
            }
        }
    }

    if let (Some(column), Some(op)) = (filter_column, filter_op) {
        descriptor.filter = Some(Filter {
            column,
            op,
            value: filter_value,
        });
    }
    descriptor
}
