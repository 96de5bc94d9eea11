//! The ad-hoc SELECT query language served over the serial link.
//!
//! [`compiler`] turns one raw input block into a [`QueryDescriptor`];
//! [`executor`] applies a descriptor to the sample store's snapshot.
//! Descriptors live for a single dispatch cycle and are never persisted.

pub mod compiler;
pub mod descriptor;
pub mod executor;

pub use compiler::{compile, is_select};
pub use descriptor::{Column, ColumnSet, CompareOp, Filter, QueryDescriptor};
pub use executor::execute;
