//! Structured form of one parsed SELECT line.

/// A queryable column of the sample table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Time,
    Potentiometer,
    Button,
    Led,
}

impl Column {
    /// Fixed projection order: time, potv, butp, ledo.
    pub const ALL: [Column; 4] = [
        Column::Time,
        Column::Potentiometer,
        Column::Button,
        Column::Led,
    ];

    /// The 4-byte token naming this column on the wire.
    pub const fn token(self) -> &'static str {
        match self {
            Column::Time => "time",
            Column::Potentiometer => "potv",
            Column::Button => "butp",
            Column::Led => "ledo",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Column::Time => 1 << 0,
            Column::Potentiometer => 1 << 1,
            Column::Button => 1 << 2,
            Column::Led => 1 << 3,
        }
    }
}

/// Bit-flag set of columns.
///
/// Replaces the decimal-digit place-value encoding of the original
/// firmware with named flags; the set itself is still what an ORDER BY
/// list collapses into, so multiple sort columns fold into one selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSet(u8);

impl ColumnSet {
    pub const EMPTY: ColumnSet = ColumnSet(0);
    pub const ALL: ColumnSet = ColumnSet(
        Column::Time.bit() | Column::Potentiometer.bit() | Column::Button.bit() | Column::Led.bit(),
    );

    pub fn insert(&mut self, column: Column) {
        self.0 |= column.bit();
    }

    pub fn contains(self, column: Column) -> bool {
        self.0 & column.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The single sort key this set stands for, by fixed precedence:
    /// LED over BUTTON over POTENTIOMETER over TIME. Only one key is ever
    /// honored; that is a design limit of the query language, not an
    /// omission.
    pub fn sort_key(self) -> Option<Column> {
        [
            Column::Led,
            Column::Button,
            Column::Potentiometer,
            Column::Time,
        ]
        .into_iter()
        .find(|column| self.contains(*column))
    }
}

/// Comparison operator of a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
    Le,
    Ge,
    Ne,
}

impl CompareOp {
    pub fn evaluate(self, lhs: u64, rhs: u64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Eq => lhs == rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Ne => lhs != rhs,
        }
    }

    /// Absorb an immediately following `=` into this operator, as the
    /// scanner does for `<=`, `>=`, and `!=`.
    pub(crate) fn with_equals(self) -> CompareOp {
        match self {
            CompareOp::Lt => CompareOp::Le,
            CompareOp::Gt => CompareOp::Ge,
            other => other,
        }
    }
}

/// The single predicate of a WHERE clause: `column op value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub column: Column,
    pub op: CompareOp,
    pub value: u64,
}

/// Parsed form of one SELECT request, consumed by the executor and then
/// discarded. A descriptor is always produced, however malformed the
/// input: the compiler degrades to whatever tokens it recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Columns to project. May be empty (degenerate SELECT).
    pub selected: ColumnSet,
    /// Optional single-predicate filter.
    pub filter: Option<Filter>,
    /// Columns named by ORDER BY, collapsed into one selector.
    pub order_by: ColumnSet,
}
